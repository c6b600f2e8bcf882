//! Error types for schema parsing.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while reading and parsing a schema.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(veil::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Syntax error in the schema file.
    #[error("syntax error in schema at line {line}: {message}")]
    #[diagnostic(code(veil::schema::syntax_error))]
    SyntaxError {
        #[source_code]
        src: String,
        #[label("error here")]
        span: miette::SourceSpan,
        line: usize,
        message: String,
    },
}

impl SchemaError {
    /// Create a syntax error with source location.
    pub fn syntax(
        src: impl Into<String>,
        offset: usize,
        len: usize,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::SyntaxError {
            src: src.into(),
            span: (offset, len).into(),
            line,
            message: message.into(),
        }
    }

    /// The 1-based line of the error, if it points into the source.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::SyntaxError { line, .. } => Some(*line),
            Self::IoError { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_result_type() {
        let ok_result: SchemaResult<i32> = Ok(42);
        assert_eq!(ok_result.unwrap(), 42);
    }

    #[test]
    fn test_syntax_error() {
        let err = SchemaError::syntax("model { }", 6, 1, 1, "expected identifier");

        match err {
            SchemaError::SyntaxError {
                src,
                span,
                line,
                message,
            } => {
                assert_eq!(src, "model { }");
                assert_eq!(span.offset(), 6);
                assert_eq!(span.len(), 1);
                assert_eq!(line, 1);
                assert_eq!(message, "expected identifier");
            }
            _ => panic!("Expected SyntaxError"),
        }
    }

    #[test]
    fn test_syntax_error_display() {
        let err = SchemaError::syntax("model", 0, 5, 3, "unexpected");
        let display = format!("{}", err);
        assert!(display.contains("syntax error"));
        assert!(display.contains("line 3"));
        assert!(display.contains("unexpected"));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SchemaError::IoError {
            path: "schema.prisma".to_string(),
            source: io_err,
        };

        assert!(err.to_string().contains("schema.prisma"));
        assert_eq!(err.line(), None);
    }
}
