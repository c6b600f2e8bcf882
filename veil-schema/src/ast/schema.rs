//! Top-level schema definition.

use serde::{Deserialize, Serialize};

use super::{CommentBlock, ConfigBlock, Enum, Model};

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    /// A `datasource` or `generator` block.
    Config(ConfigBlock),
    /// A model.
    Model(Model),
    /// An enum.
    Enum(Enum),
    /// Consecutive comment lines outside of any block.
    Comments(CommentBlock),
}

impl Declaration {
    /// A short name of the declaration kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(block) => block.kind.as_str(),
            Self::Model(_) => "model",
            Self::Enum(_) => "enum",
            Self::Comments(_) => "comment",
        }
    }
}

/// A complete schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    /// Iterate over the models.
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Model(m) => Some(m),
            _ => None,
        })
    }

    /// Iterate over the enums.
    pub fn enums(&self) -> impl Iterator<Item = &Enum> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Enum(e) => Some(e),
            _ => None,
        })
    }

    /// Iterate over the datasource and generator blocks.
    pub fn config_blocks(&self) -> impl Iterator<Item = &ConfigBlock> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Config(c) => Some(c),
            _ => None,
        })
    }

    /// Get a model by name.
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models().find(|m| m.name() == name)
    }

    /// Get an enum by name.
    pub fn get_enum(&self, name: &str) -> Option<&Enum> {
        self.enums().find(|e| e.name() == name)
    }

    /// The declaration kinds in source order.
    pub fn shape(&self) -> Vec<&'static str> {
        self.declarations.iter().map(Declaration::kind).collect()
    }

    /// Get statistics about the schema.
    pub fn stats(&self) -> SchemaStats {
        SchemaStats {
            model_count: self.models().count(),
            enum_count: self.enums().count(),
            field_count: self.models().map(|m| m.fields().count()).sum(),
            enum_value_count: self.enums().map(|e| e.values().count()).sum(),
        }
    }
}

/// Schema statistics for debugging/info.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaStats {
    /// Number of models.
    pub model_count: usize,
    /// Number of enums.
    pub enum_count: usize,
    /// Total number of fields across all models.
    pub field_count: usize,
    /// Total number of values across all enums.
    pub enum_value_count: usize,
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        write!(
            f,
            "Schema({} models, {} enums, {} fields, {} enum values)",
            stats.model_count, stats.enum_count, stats.field_count, stats.enum_value_count
        )
    }
}
