//! Configuration management for the pipeline updater CLI.
//!
//! Settings come from an optional TOML file in the current directory. The `--api-host`
//! flag takes precedence over the file's `api_host`, which takes precedence over the
//! public GitHub API.
//!
//! # Example TOML Configuration
//!
//! ```toml
//! api_host = "github.example.com/api/v3"
//!
//! [workflow]
//! variant = "ox-scan"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use github_client::ApiConfig;
use pipeline_updater_core::WorkflowVariant;
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "pipeline-updater.toml";

/// Environment variable that points at a configuration file in another location
pub const CONFIG_PATH_ENV_VAR: &str = "PIPELINE_UPDATER_CONFIG";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Settings read from the configuration file.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// GitHub API host to use when `--api-host` is not given.
    #[serde(default)]
    pub api_host: Option<String>,

    /// Which workflow file to deploy.
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

/// The `[workflow]` table.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub variant: WorkflowVariant,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or does not
    /// match the expected schema.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        info!(
            path = ?path,
            variant = %config.workflow.variant,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Loads the configuration file if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, Error> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Resolves the API host from the command line flag, this configuration, or the
    /// public GitHub API, in that order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the chosen host is not a valid API location.
    pub fn resolve_api_config(&self, cli_host: Option<&str>) -> Result<ApiConfig, Error> {
        let host = cli_host.or(self.api_host.as_deref());

        let config = match host {
            Some(host) => ApiConfig::new(host).map_err(|e| Error::Config(e.to_string()))?,
            None => ApiConfig::default(),
        };

        debug!(base_uri = config.base_uri(), "Resolved GitHub API location");
        Ok(config)
    }
}

/// Resolves the path to the configuration file.
///
/// - If `config_path` is `Some(path)`, returns that path as a `PathBuf`
/// - If `config_path` is `None`, returns `./pipeline-updater.toml` in the current directory
/// - Falls back to the relative path if the working directory cannot be determined
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
