//! Model and enum definitions for the schema AST.

use serde::{Deserialize, Serialize};

use super::{Attribute, Comment, Field, Ident, Span};

/// A block-level attribute (`@@index(...)`) with its trailing comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockAttribute {
    /// The attribute.
    pub attribute: Attribute,
    /// Comment at the end of the attribute's line.
    pub comment: Option<Comment>,
}

impl BlockAttribute {
    /// Wrap an attribute.
    pub fn new(attribute: Attribute) -> Self {
        Self {
            attribute,
            comment: None,
        }
    }
}

/// A member of a model body, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelMember {
    /// A field.
    Field(Field),
    /// A block attribute (`@@id`, `@@index`, `@@unique`, `@@map`, ...).
    Attribute(BlockAttribute),
    /// A comment on its own line.
    Comment(Comment),
}

/// A model definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model name.
    pub name: Ident,
    /// Fields, block attributes and comments in declared order.
    pub members: Vec<ModelMember>,
    /// Source location.
    pub span: Span,
}

impl Model {
    /// Create a new model.
    pub fn new(name: Ident, span: Span) -> Self {
        Self {
            name,
            members: vec![],
            span,
        }
    }

    /// Get the model name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Append a member.
    pub fn push(&mut self, member: ModelMember) {
        self.members.push(member);
    }

    /// Iterate over the fields.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.members.iter().filter_map(|m| match m {
            ModelMember::Field(f) => Some(f),
            _ => None,
        })
    }

    /// Iterate over the block attributes.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.members.iter().filter_map(|m| match m {
            ModelMember::Attribute(a) => Some(&a.attribute),
            _ => None,
        })
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|f| f.name() == name)
    }

    /// Check if this model has a specific block attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes().any(|a| a.is(name))
    }

    /// Get a block attribute by name.
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().find(|a| a.is(name))
    }
}

/// A member of an enum body, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnumMember {
    /// An enum value.
    Value(EnumValue),
    /// A block attribute (`@@map`, `@@schema`).
    Attribute(BlockAttribute),
    /// A comment on its own line.
    Comment(Comment),
}

/// An enum definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    /// Enum name.
    pub name: Ident,
    /// Values, block attributes and comments in declared order.
    pub members: Vec<EnumMember>,
    /// Source location.
    pub span: Span,
}

impl Enum {
    /// Create a new enum.
    pub fn new(name: Ident, span: Span) -> Self {
        Self {
            name,
            members: vec![],
            span,
        }
    }

    /// Get the enum name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Append a member.
    pub fn push(&mut self, member: EnumMember) {
        self.members.push(member);
    }

    /// Iterate over the values.
    pub fn values(&self) -> impl Iterator<Item = &EnumValue> {
        self.members.iter().filter_map(|m| match m {
            EnumMember::Value(v) => Some(v),
            _ => None,
        })
    }

    /// Get a value by name.
    pub fn get_value(&self, name: &str) -> Option<&EnumValue> {
        self.values().find(|v| v.name() == name)
    }
}

/// A single enum value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Value name.
    pub name: Ident,
    /// Value attributes (e.g. `@map`).
    pub attributes: Vec<Attribute>,
    /// Comment at the end of the value's line.
    pub comment: Option<Comment>,
    /// Source location.
    pub span: Span,
}

impl EnumValue {
    /// Create a new enum value.
    pub fn new(name: Ident, span: Span) -> Self {
        Self {
            name,
            attributes: vec![],
            comment: None,
            span,
        }
    }

    /// Get the value name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
