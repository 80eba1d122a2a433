//! # Runtime Configuration Module
//!
//! Environment-variable driven startup settings.
//!
//! ## Environment Variables
//!
//! ### `CORSH_CONFIG`
//!
//! Path to a CORS settings file (`.yaml`, `.yml` or `.json`, see
//! [`crate::settings`]). When unset, the default header set is installed.
//!
//! ### `CORSH_LOG_LEVEL`, `CORSH_LOG_FORMAT`
//!
//! See [`crate::logging::LogConfig::from_env`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use corsheaders::runtime_config::RuntimeConfig;
//!
//! let runtime = RuntimeConfig::from_env();
//! let config = runtime.install_cors().expect("valid CORS settings");
//! println!("CORS mode: {}", config.mode());
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use crate::logging::LogConfig;
use crate::middleware::cors::{CorsBuilder, CorsConfig, CorsSlot};
use crate::settings;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// CORS settings file (`CORSH_CONFIG`)
    pub config_path: Option<PathBuf>,
    pub log: LogConfig,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let config_path = env::var("CORSH_CONFIG")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        RuntimeConfig {
            config_path,
            log: LogConfig::from_env(),
        }
    }

    /// Build the configured CORS header set and install it process-wide
    pub fn install_cors(&self) -> anyhow::Result<Arc<CorsConfig>> {
        self.install_cors_into(&CorsSlot::global())
    }

    /// Build the configured CORS header set and install it into `slot`
    pub fn install_cors_into(&self, slot: &CorsSlot) -> anyhow::Result<Arc<CorsConfig>> {
        match &self.config_path {
            Some(path) => settings::install_from_file_into(path, slot),
            None => CorsBuilder::default_cors()
                .build_into(slot)
                .context("default CORS configuration rejected"),
        }
    }
}
