//! CLI command implementations.

pub mod obfuscate;
pub mod version;
