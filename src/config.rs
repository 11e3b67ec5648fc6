//! Plugin-wide configuration shared by the transformer and the positioner.
//!
//! A [`PluginConfig`] is built once (from defaults or a JSON file) and handed
//! to [`BlendTransformer`](crate::BlendTransformer) and
//! [`LayerPositioner`](crate::LayerPositioner) when they are constructed.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "supportedBlocks": ["core/paragraph", "core/heading"],
//!   "markers": { "prefix": "abmb" }
//! }
//! ```
//!
//! Omitted keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Block types eligible for blend effects.
pub const DEFAULT_SUPPORTED_BLOCKS: [&str; 5] = [
    "core/paragraph",
    "core/heading",
    "core/group",
    "core/row",
    "core/stack",
];

// ============================================================================
// Markers
// ============================================================================

/// Naming scheme for the class tokens and custom properties the effects emit.
///
/// Every name is derived from a single prefix, so `prefix = "abmb"` yields
/// `abmb-stripe-base`, `--abmb-blend-mode` and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Markers {
    /// Prefix for every emitted class and custom property.
    pub prefix: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            prefix: "abmb".to_string(),
        }
    }
}

impl Markers {
    /// Class added to a block rendered with the simple effect.
    pub fn simple_class(&self) -> String {
        format!("{}-blend-simple", self.prefix)
    }

    /// Class added to the base element of the stripe effect.
    pub fn base_class(&self) -> String {
        format!("{}-stripe-base", self.prefix)
    }

    /// Class carried by the burn overlay.
    pub fn burn_class(&self) -> String {
        format!("{}-stripe-burn", self.prefix)
    }

    /// Class carried by the soft overlay.
    pub fn soft_class(&self) -> String {
        format!("{}-stripe-soft", self.prefix)
    }

    /// Editor wrapper class for a simple-effect preview.
    pub fn simple_preview_class(&self) -> String {
        self.simple_class()
    }

    /// Editor wrapper class for a stripe-effect preview.
    pub fn stripe_preview_class(&self) -> String {
        format!("{}-blend-stripe-preview", self.prefix)
    }

    /// Editor wrapper class common to every preview.
    pub fn editor_preview_class(&self) -> String {
        format!("{}-editor-preview", self.prefix)
    }

    /// Custom property name, e.g. `var_name("blend-mode")` → `--abmb-blend-mode`.
    pub fn var_name(&self, name: &str) -> String {
        format!("--{}-{}", self.prefix, name)
    }
}

// ============================================================================
// PluginConfig
// ============================================================================

/// Configuration passed explicitly to the transformer and the positioner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    /// Block identifiers (exact, case-sensitive) that may be transformed.
    pub supported_blocks: Vec<String>,

    /// Naming scheme for emitted markup.
    pub markers: Markers,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            supported_blocks: DEFAULT_SUPPORTED_BLOCKS.iter().map(|b| b.to_string()).collect(),
            markers: Markers::default(),
        }
    }
}

impl PluginConfig {
    /// Returns true if `block_type` is on the allow-list.
    pub fn supports(&self, block_type: &str) -> bool {
        self.supported_blocks.iter().any(|b| b == block_type)
    }

    /// The settings object handed to the client runtime.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            supported_blocks: self.supported_blocks.clone(),
        }
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            blocks = config.supported_blocks.len(),
            "loaded plugin config"
        );
        Ok(config)
    }

    /// Serializes the configuration to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn validate(&self) -> Result<()> {
        let prefix = &self.markers.prefix;
        let valid_prefix = !prefix.is_empty()
            && prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_prefix {
            return Err(Error::InvalidConfig(format!(
                "marker prefix {prefix:?} must be a non-empty run of [A-Za-z0-9_-]"
            )));
        }
        if let Some(blank) = self.supported_blocks.iter().find(|b| b.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "supported block identifier {blank:?} is blank"
            )));
        }
        Ok(())
    }
}

/// Settings object the client runtime receives from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    pub supported_blocks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allow_list() {
        let config = PluginConfig::default();
        for block in DEFAULT_SUPPORTED_BLOCKS {
            assert!(config.supports(block));
        }
        assert!(!config.supports("core/image"));
        assert!(!config.supports("Core/Paragraph"));
        assert!(!config.supports("paragraph"));
    }

    #[test]
    fn marker_names() {
        let markers = Markers::default();
        assert_eq!(markers.simple_class(), "abmb-blend-simple");
        assert_eq!(markers.base_class(), "abmb-stripe-base");
        assert_eq!(markers.burn_class(), "abmb-stripe-burn");
        assert_eq!(markers.soft_class(), "abmb-stripe-soft");
        assert_eq!(markers.var_name("soft-z-index"), "--abmb-soft-z-index");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PluginConfig::from_json(r#"{ "supportedBlocks": ["acme/card"] }"#).unwrap();
        assert_eq!(config.supported_blocks, vec!["acme/card".to_string()]);
        assert_eq!(config.markers, Markers::default());

        let config = PluginConfig::from_json(r#"{ "markers": { "prefix": "fx" } }"#).unwrap();
        assert!(config.supports("core/group"));
        assert_eq!(config.markers.base_class(), "fx-stripe-base");
    }

    #[test]
    fn rejects_unusable_prefix() {
        let err = PluginConfig::from_json(r#"{ "markers": { "prefix": "a b" } }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = PluginConfig::from_json(r#"{ "supportedBlocks": [" "] }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn client_settings_json() {
        let json = serde_json::to_string(&PluginConfig::default().client_settings()).unwrap();
        assert!(json.starts_with("{\"supportedBlocks\":[\"core/paragraph\""));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = PluginConfig::load("/nonexistent/blend-layers.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
