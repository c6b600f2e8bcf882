//! Configuration file handling.
//!
//! ```toml
//! [obfuscation]
//! enum_values = "global"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use veil_core::ObfuscateOptions;

use crate::error::{CliError, CliResult};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "veil.toml";

/// Veil configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Obfuscation options
    pub obfuscation: ObfuscateOptions,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> CliResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Otherwise `veil.toml` in the working
    /// directory is used when present, and the defaults when it is not.
    pub fn discover(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        let default_path = PathBuf::from(CONFIG_FILE_NAME);
        if default_path.exists() {
            tracing::debug!(path = %default_path.display(), "Using configuration file");
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}
