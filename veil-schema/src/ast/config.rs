//! Datasource and generator blocks.

use serde::{Deserialize, Serialize};

use super::{Comment, Expression, Ident, Span};

/// The kind of a configuration block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigKind {
    /// `datasource name { ... }`
    Datasource,
    /// `generator name { ... }`
    Generator,
}

impl ConfigKind {
    /// Parse a block keyword.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "datasource" => Some(Self::Datasource),
            "generator" => Some(Self::Generator),
            _ => None,
        }
    }

    /// Get the block keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Datasource => "datasource",
            Self::Generator => "generator",
        }
    }
}

/// A `key = value` line inside a configuration block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property key.
    pub name: Ident,
    /// Property value.
    pub value: Expression,
    /// Comment at the end of the property's line.
    pub comment: Option<Comment>,
    /// Source location.
    pub span: Span,
}

impl Property {
    /// Create a new property.
    pub fn new(name: Ident, value: Expression, span: Span) -> Self {
        Self {
            name,
            value,
            comment: None,
            span,
        }
    }
}

/// A member of a configuration block, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfigMember {
    /// A property.
    Property(Property),
    /// A comment on its own line.
    Comment(Comment),
}

/// A `datasource` or `generator` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigBlock {
    /// Block kind.
    pub kind: ConfigKind,
    /// Block name (e.g. `db`, `client`).
    pub name: Ident,
    /// Properties and comments in declared order.
    pub members: Vec<ConfigMember>,
    /// Source location.
    pub span: Span,
}

impl ConfigBlock {
    /// Create a new configuration block.
    pub fn new(kind: ConfigKind, name: Ident, span: Span) -> Self {
        Self {
            kind,
            name,
            members: vec![],
            span,
        }
    }

    /// Iterate over the properties.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.members.iter().filter_map(|m| match m {
            ConfigMember::Property(p) => Some(p),
            ConfigMember::Comment(_) => None,
        })
    }

    /// Get a property value by key.
    pub fn get(&self, key: &str) -> Option<&Expression> {
        self.properties()
            .find(|p| p.name.as_str() == key)
            .map(|p| &p.value)
    }
}
