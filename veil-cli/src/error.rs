//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

use veil_core::ObfuscateError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(veil::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(veil::config))]
    Config(String),

    /// Input file error
    #[error("{0}")]
    #[diagnostic(code(veil::input))]
    Input(String),

    /// Obfuscation error, reported verbatim
    #[error(transparent)]
    #[diagnostic(transparent)]
    Obfuscate(#[from] ObfuscateError),

    /// Mapping serialization error
    #[error("Failed to serialize mapping: {0}")]
    #[diagnostic(code(veil::mapping))]
    Mapping(#[from] serde_json::Error),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}
