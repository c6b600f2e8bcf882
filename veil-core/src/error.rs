//! Error types for schema obfuscation.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;
use veil_schema::SchemaError;

/// Result type for obfuscation operations.
pub type ObfuscateResult<T> = Result<T, ObfuscateError>;

/// Errors that abort an obfuscation run.
///
/// Every variant is fatal: the run stops at the first error and no output is
/// rendered.
#[derive(Error, Debug, Diagnostic)]
pub enum ObfuscateError {
    /// A name was declared twice where it must be unique.
    #[error("duplicate {kind} '{name}'{}{}", in_scope(.scope), at_line(.line))]
    #[diagnostic(
        code(veil::obfuscate::duplicate_declaration),
        help("model and enum names share one namespace; field and value names must be unique within their block")
    )]
    DuplicateDeclaration {
        kind: &'static str,
        name: String,
        scope: Option<String>,
        line: Option<usize>,
    },

    /// A reference names something that was never declared.
    #[error("failed to find replacement name for {kind} '{name}'{}{}", in_scope(.scope), at_line(.line))]
    #[diagnostic(code(veil::obfuscate::unresolved_reference))]
    UnresolvedReference {
        kind: &'static str,
        name: String,
        scope: Option<String>,
        line: Option<usize>,
    },

    /// An attribute's arguments do not have a supported shape.
    #[error("malformed {attribute}: {message}{}", at_line(.line))]
    #[diagnostic(code(veil::obfuscate::malformed_attribute))]
    MalformedAttribute {
        attribute: String,
        message: String,
        line: Option<usize>,
    },

    /// A literal default on a type with no replacement value.
    #[error(
        "found default value for field '{field}' but have no replacement value for type '{field_type}'{}",
        at_line(.line)
    )]
    #[diagnostic(
        code(veil::obfuscate::unsupported_default),
        help("literal defaults are only replaced on String, Int, Boolean and Json fields")
    )]
    UnsupportedDefault {
        field: String,
        field_type: String,
        line: Option<usize>,
    },

    /// An enum constant used as the default of a field that is not enum-typed.
    #[error(
        "enum constant default on field '{field}' of non-enum type '{field_type}'{}",
        at_line(.line)
    )]
    #[diagnostic(code(veil::obfuscate::inconsistent_default))]
    InconsistentDefault {
        field: String,
        field_type: String,
        line: Option<usize>,
    },

    /// The input could not be parsed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] SchemaError),
}

fn in_scope(scope: &Option<String>) -> String {
    match scope {
        Some(scope) => format!(" in '{}'", scope),
        None => String::new(),
    }
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

impl ObfuscateError {
    /// Create a malformed attribute error.
    pub fn malformed(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedAttribute {
            attribute: attribute.into(),
            message: message.into(),
            line: None,
        }
    }

    /// Attach a source line unless the error already carries one.
    pub fn at_line(mut self, source_line: usize) -> Self {
        match &mut self {
            Self::DuplicateDeclaration { line, .. }
            | Self::UnresolvedReference { line, .. }
            | Self::MalformedAttribute { line, .. }
            | Self::UnsupportedDefault { line, .. }
            | Self::InconsistentDefault { line, .. } => {
                line.get_or_insert(source_line);
            }
            Self::Parse(_) => {}
        }
        self
    }

    /// The 1-based source line of the offending node, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::DuplicateDeclaration { line, .. }
            | Self::UnresolvedReference { line, .. }
            | Self::MalformedAttribute { line, .. }
            | Self::UnsupportedDefault { line, .. }
            | Self::InconsistentDefault { line, .. } => *line,
            Self::Parse(err) => err.line(),
        }
    }
}
