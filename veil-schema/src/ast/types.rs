//! Type definitions for the schema AST.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A span in the source code for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start offset in bytes.
    pub start: usize,
    /// End offset in bytes.
    pub end: usize,
    /// 1-based line of `start`.
    pub line: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// An identifier with source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    /// The identifier name.
    pub name: SmolStr,
    /// Source location.
    pub span: Span,
}

impl Ident {
    /// Create a new identifier.
    pub fn new(name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Replace the name, keeping the source location.
    pub fn rename(&mut self, name: impl Into<SmolStr>) {
        self.name = name.into();
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Built-in scalar types.
///
/// `Unsupported("...")` is built in as well but carries a payload, so it lives
/// on [`FieldType`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// `String`.
    String,
    /// `Boolean`.
    Boolean,
    /// `Int`.
    Int,
    /// `BigInt`.
    BigInt,
    /// `Float`.
    Float,
    /// `Decimal`.
    Decimal,
    /// `DateTime`.
    DateTime,
    /// `Json`.
    Json,
    /// `Bytes`.
    Bytes,
}

impl ScalarType {
    /// Parse a scalar type from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "String" => Some(Self::String),
            "Boolean" => Some(Self::Boolean),
            "Int" => Some(Self::Int),
            "BigInt" => Some(Self::BigInt),
            "Float" => Some(Self::Float),
            "Decimal" => Some(Self::Decimal),
            "DateTime" => Some(Self::DateTime),
            "Json" => Some(Self::Json),
            "Bytes" => Some(Self::Bytes),
            _ => None,
        }
    }

    /// Get the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Int => "Int",
            Self::BigInt => "BigInt",
            Self::Float => "Float",
            Self::Decimal => "Decimal",
            Self::DateTime => "DateTime",
            Self::Json => "Json",
            Self::Bytes => "Bytes",
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field type in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// A built-in scalar type (`Int`, `String`, ...).
    Scalar(ScalarType),
    /// A reference to a model or an enum declared in the schema.
    Named(Ident),
    /// `Unsupported("...")`, holding the raw string content.
    Unsupported(String),
}

impl FieldType {
    /// Get the scalar type, if any.
    pub fn scalar(&self) -> Option<ScalarType> {
        match self {
            Self::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Get the referenced model or enum name, if any.
    pub fn reference(&self) -> Option<&Ident> {
        match self {
            Self::Named(ident) => Some(ident),
            _ => None,
        }
    }

    /// Get the type name as a string.
    ///
    /// Returns `None` for `Unsupported`, which names no type of the schema.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s.as_str()),
            Self::Named(ident) => Some(ident.as_str()),
            Self::Unsupported(_) => None,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{}", s),
            Self::Named(ident) => write!(f, "{}", ident),
            Self::Unsupported(raw) => write!(f, "Unsupported(\"{}\")", raw),
        }
    }
}

/// Modifier for field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeModifier {
    /// Required field (no modifier).
    Required,
    /// Optional field (`?` suffix).
    Optional,
    /// List/Array field (`[]` suffix).
    List,
    /// Optional list field (`[]?` suffix).
    OptionalList,
}

impl TypeModifier {
    /// Check if the field is optional.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional | Self::OptionalList)
    }

    /// Check if the field is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List | Self::OptionalList)
    }

    /// The suffix written after the type name.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Required => "",
            Self::Optional => "?",
            Self::List => "[]",
            Self::OptionalList => "[]?",
        }
    }
}

/// Which comment syntax a comment was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/// ...`
    Doc,
}

impl CommentKind {
    /// The comment marker.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Line => "//",
            Self::Doc => "///",
        }
    }
}

/// A single comment line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment syntax.
    pub kind: CommentKind,
    /// The comment text, without the marker and surrounding whitespace.
    pub text: String,
    /// Source location.
    pub span: Span,
}

impl Comment {
    /// Create a new comment.
    pub fn new(kind: CommentKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Remove the comment text, keeping the comment in place.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Check if the text has been stripped (or was empty).
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A run of consecutive top-level comment lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentBlock {
    /// The comment lines.
    pub comments: Vec<Comment>,
    /// Source location.
    pub span: Span,
}

impl CommentBlock {
    /// Create a new comment block.
    pub fn new(comments: Vec<Comment>, span: Span) -> Self {
        Self { comments, span }
    }
}
