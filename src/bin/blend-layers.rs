//! # blend-layers
//!
//! Command-line front end to the blend transformer.
//!
//! ```bash
//! blend-layers transform --block core/paragraph --settings '{"enabled":true,"mode":"stripe"}' < in.html
//! blend-layers transform --block core/heading --settings settings.json --input in.html --output out.html
//! blend-layers preview --block core/group --settings '{"enabled":true}'
//! blend-layers attribute
//! blend-layers client-settings --config blend.json
//! blend-layers stylesheet
//! ```

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use blend_layers::{
    BlendSettings, BlendTransformer, Error, PluginConfig, Result, attribute_definition,
    editor_preview, stylesheet,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "blend-layers", version, about = "Apply layered blend effects to block markup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Plugin configuration file (JSON); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transform one block's rendered HTML
    Transform {
        /// Block type identifier, e.g. core/paragraph
        #[arg(short, long)]
        block: String,

        /// Settings as inline JSON or a path to a JSON file
        #[arg(short, long)]
        settings: Option<String>,

        /// Treat the settings JSON as the block's attribute object
        #[arg(long)]
        attributes: bool,

        /// HTML input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the editor preview wrapper props as JSON
    Preview {
        /// Block type identifier
        #[arg(short, long)]
        block: String,

        /// Settings as inline JSON or a path to a JSON file
        #[arg(short, long)]
        settings: Option<String>,

        /// Existing wrapper style object as inline JSON
        #[arg(long)]
        wrapper_style: Option<String>,
    },

    /// Print the block attribute definition
    Attribute,

    /// Print the settings object handed to the client runtime
    ClientSettings,

    /// Print the front-end stylesheet
    Stylesheet,

    /// Print the JSON schema of the block settings
    #[cfg(feature = "jsonschema")]
    Schema,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("blend-layers: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PluginConfig::load(path)?,
        None => PluginConfig::default(),
    };

    match cli.command {
        Commands::Transform {
            block,
            settings,
            attributes,
            input,
            output,
        } => {
            let html = read_input(input.as_deref())?;
            let transformer = BlendTransformer::new(config);
            let rendered = if attributes {
                let attrs = match settings.as_deref() {
                    Some(arg) => serde_json::from_str(&settings_source(arg)?)?,
                    None => serde_json::Value::Null,
                };
                transformer.render_with_attributes(&block, &html, &attrs)
            } else {
                let settings = load_settings(settings.as_deref())?;
                transformer.render_block(&block, &html, &settings)
            };
            write_output(output.as_deref(), &rendered)
        }
        Commands::Preview {
            block,
            settings,
            wrapper_style,
        } => {
            let settings = load_settings(settings.as_deref())?;
            let wrapper_style: Option<serde_json::Map<String, serde_json::Value>> = wrapper_style
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?;
            let preview = editor_preview(&config, &block, &settings, wrapper_style.as_ref());
            print_json(&preview)
        }
        Commands::Attribute => print_json(&attribute_definition()),
        Commands::ClientSettings => print_json(&config.client_settings()),
        Commands::Stylesheet => write_output(None, &stylesheet(&config.markers)),
        #[cfg(feature = "jsonschema")]
        Commands::Schema => print_json(&schemars::schema_for!(BlendSettings)),
    }
}

/// Inline JSON is used as-is; anything else is read as a file path.
fn settings_source(arg: &str) -> Result<String> {
    if arg.trim_start().starts_with('{') {
        return Ok(arg.to_string());
    }
    std::fs::read_to_string(arg).map_err(|source| Error::Io {
        path: PathBuf::from(arg),
        source,
    })
}

fn load_settings(arg: Option<&str>) -> Result<BlendSettings> {
    match arg {
        Some(arg) => Ok(BlendSettings::from_json(&settings_source(arg)?)?),
        None => Ok(BlendSettings::default()),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .map_err(|source| Error::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(html)
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => std::io::stdout()
            .write_all(text.as_bytes())
            .map_err(|source| Error::Io {
                path: PathBuf::from("<stdout>"),
                source,
            }),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    write_output(None, &json)
}
