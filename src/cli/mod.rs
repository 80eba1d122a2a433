//! # CLI Module
//!
//! Command-line tooling for checking CORS settings files and previewing the
//! headers they produce.
//!
//! ## Commands
//!
//! ### `preview`
//!
//! Apply a configuration to a response and print the resulting headers:
//!
//! ```bash
//! corsheaders preview --config cors.yaml --existing "Access-Control-Allow-Methods=GET"
//! ```
//!
//! Options:
//! - `--config <FILE>` - Settings file (`.yaml`, `.yml`, `.json`). Falls back to
//!   `CORSH_CONFIG`, then to the default header set
//! - `--existing <NAME=VALUE>` - Header already on the response (repeatable)
//!
//! ### `check`
//!
//! Validate a settings file without printing headers:
//!
//! ```bash
//! corsheaders check --config cors.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use corsheaders::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(cli, &mut std::io::stdout())?;
//! ```

mod commands;


pub use commands::{parse_existing_header, run_cli, Cli, Commands};
