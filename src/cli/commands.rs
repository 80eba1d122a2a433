use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use http::HeaderMap;
use tracing::info;

use crate::middleware::cors::{apply_config, CorsBuilder, CorsConfig, ResponseHeaders};
use crate::settings::load_settings;

/// Command-line interface for corsheaders
#[derive(Parser, Debug)]
#[command(name = "corsheaders")]
#[command(version, about = "Preview and check CORS header configurations", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a configuration to a response and print the resulting headers
    Preview {
        /// Settings file (YAML or JSON); the default header set when omitted
        #[arg(short, long, env = "CORSH_CONFIG")]
        config: Option<PathBuf>,

        /// Header already present on the response, as NAME=VALUE (repeatable)
        #[arg(short, long, value_name = "NAME=VALUE")]
        existing: Vec<String>,
    },
    /// Validate a settings file
    Check {
        /// Settings file (YAML or JSON)
        #[arg(short, long, env = "CORSH_CONFIG")]
        config: PathBuf,
    },
}

/// Split a `NAME=VALUE` argument
///
/// The value may be empty and may itself contain `=`.
pub fn parse_existing_header(arg: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got `{arg}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("empty header name in `{arg}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<CorsConfig> {
    let builder = match path {
        Some(path) => load_settings(path)?.into_builder(),
        None => CorsBuilder::default_cors(),
    };
    let config = builder.finish().with_context(|| match path {
        Some(path) => format!("rejected CORS settings in {}", path.display()),
        None => "default CORS configuration rejected".to_string(),
    })?;
    Ok(config)
}

/// Run a parsed command, writing its report to `out`
pub fn run_cli<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    match cli.command {
        Commands::Preview { config, existing } => {
            let config = load_config(config.as_ref())?;

            let mut headers = HeaderMap::new();
            for arg in &existing {
                let (name, value) = parse_existing_header(arg)?;
                headers.add_header(&name, value);
            }
            apply_config(&config, &mut headers);

            for (name, value) in &headers {
                writeln!(out, "{}: {}", name, value.to_str().unwrap_or("<non-ascii>"))?;
            }
            Ok(())
        }
        Commands::Check { config: path } => {
            let config = load_config(Some(&path))?;
            info!(path = %path.display(), mode = %config.mode(), "CORS settings are valid");
            writeln!(out, "{}: ok ({} mode)", path.display(), config.mode())?;
            Ok(())
        }
    }
}
