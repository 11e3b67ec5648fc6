//! Error type for the fallible edges of the crate.
//!
//! Transformation and positioning never fail. Only loading configuration or
//! settings from JSON, and the CLI's file handling, can produce an [`Error`].

use std::path::PathBuf;

/// Errors raised while loading configuration or settings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The JSON document could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A colour value was empty, malformed or could escape its declaration.
    #[error("invalid colour {0:?}")]
    InvalidColor(String),

    /// The configuration parsed but is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
