//! Options controlling how synthetic names are allocated.

use serde::{Deserialize, Serialize};

/// How `VALUE_<i>` enum value names are numbered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumValueNumbering {
    /// The counter restarts at 0 for every enum.
    #[default]
    PerEnum,
    /// One counter runs across every enum of the document.
    Global,
}

impl EnumValueNumbering {
    /// The name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerEnum => "per-enum",
            Self::Global => "global",
        }
    }
}

impl std::fmt::Display for EnumValueNumbering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for one obfuscation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObfuscateOptions {
    /// Enum value numbering scheme.
    pub enum_values: EnumValueNumbering,
}

impl ObfuscateOptions {
    /// Create options with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enum value numbering scheme.
    pub fn with_enum_values(mut self, numbering: EnumValueNumbering) -> Self {
        self.enum_values = numbering;
        self
    }
}
