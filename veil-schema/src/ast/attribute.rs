//! Attribute and expression definitions for the schema AST.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Ident, Span};

/// An expression used as an attribute argument or a property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// A string literal, holding the raw content between the quotes.
    String(String),
    /// An integer literal that fits in an `i64`.
    Int(i64),
    /// Any other numeric literal (decimals, integers beyond `i64`), as written.
    Number(SmolStr),
    /// A boolean literal.
    Boolean(bool),
    /// A bare (possibly dotted) path such as `APPLE`, `Cascade` or `db.Text`.
    Path(Vec<SmolStr>),
    /// A function call (e.g., `now()`, `env("DATABASE_URL")`).
    Function(FunctionCall),
    /// An array of expressions.
    Array(Vec<Expression>),
}

impl Expression {
    /// Check if this is a string, number or boolean literal.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::String(_) | Self::Int(_) | Self::Number(_) | Self::Boolean(_)
        )
    }

    /// Try to get the value as a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a path.
    pub fn as_path(&self) -> Option<&[SmolStr]> {
        match self {
            Self::Path(segments) => Some(segments),
            _ => None,
        }
    }

    /// Try to get the value as a single-segment path (a bare identifier).
    pub fn as_ident(&self) -> Option<&str> {
        match self.as_path() {
            Some([single]) => Some(single),
            _ => None,
        }
    }

    /// Try to get the value as a function call.
    pub fn as_function(&self) -> Option<&FunctionCall> {
        match self {
            Self::Function(call) => Some(call),
            _ => None,
        }
    }

    /// Try to get the value as an array.
    pub fn as_array(&self) -> Option<&[Expression]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// A short description of the expression kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int(_) | Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Path(_) => "path",
            Self::Function(_) => "function call",
            Self::Array(_) => "array",
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name, possibly dotted.
    pub name: SmolStr,
    /// Call arguments.
    pub args: Vec<Argument>,
}

impl FunctionCall {
    /// Create a new function call.
    pub fn new(name: impl Into<SmolStr>, args: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// The last segment of the function name (`env` for `env` and `x.env`).
    pub fn base_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// An argument (named or positional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument name (None for positional arguments).
    pub name: Option<Ident>,
    /// Argument value.
    pub value: Expression,
    /// Source location.
    pub span: Span,
}

impl Argument {
    /// Create a positional argument.
    pub fn positional(value: Expression, span: Span) -> Self {
        Self {
            name: None,
            value,
            span,
        }
    }

    /// Create a named argument.
    pub fn named(name: Ident, value: Expression, span: Span) -> Self {
        Self {
            name: Some(name),
            value,
            span,
        }
    }

    /// Check if this is a positional argument.
    pub fn is_positional(&self) -> bool {
        self.name.is_none()
    }

    /// Check if this is a named argument with the given name.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_ref().is_some_and(|n| n.as_str() == name)
    }
}

/// An attribute applied to a field, an enum value, or a block (`@@`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name without the `@`/`@@` prefix (e.g. `default`, `db.VarChar`).
    pub name: Ident,
    /// Attribute arguments.
    pub args: Vec<Argument>,
    /// Source location (including the prefix).
    pub span: Span,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: Ident, args: Vec<Argument>, span: Span) -> Self {
        Self { name, args, span }
    }

    /// Get the attribute name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Check if this attribute has the given name.
    pub fn is(&self, name: &str) -> bool {
        self.name.as_str() == name
    }

    /// Get the first argument's value, positional or named.
    pub fn first_arg(&self) -> Option<&Expression> {
        self.args.first().map(|a| &a.value)
    }

    /// Get the first positional argument.
    pub fn first_positional(&self) -> Option<&Expression> {
        self.args
            .iter()
            .find(|a| a.is_positional())
            .map(|a| &a.value)
    }

    /// Get a named argument by name.
    pub fn get_arg(&self, name: &str) -> Option<&Expression> {
        self.args.iter().find(|a| a.is_named(name)).map(|a| &a.value)
    }

    /// Get a mutable named argument by name.
    pub fn get_arg_mut(&mut self, name: &str) -> Option<&mut Expression> {
        self.args
            .iter_mut()
            .find(|a| a.is_named(name))
            .map(|a| &mut a.value)
    }

    /// Check if a named argument is present.
    pub fn has_arg(&self, name: &str) -> bool {
        self.args.iter().any(|a| a.is_named(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::new(0, 0, 1)
    }

    fn path(segments: &[&str]) -> Expression {
        Expression::Path(segments.iter().map(|s| SmolStr::new(*s)).collect())
    }

    // ==================== Expression Tests ====================

    #[test]
    fn test_expression_literals() {
        assert!(Expression::String("a".into()).is_literal());
        assert!(Expression::Int(1).is_literal());
        assert!(Expression::Number("1.5".into()).is_literal());
        assert!(Expression::Boolean(true).is_literal());
        assert!(!path(&["APPLE"]).is_literal());
        assert!(!Expression::Array(vec![]).is_literal());
    }

    #[test]
    fn test_expression_accessors() {
        assert_eq!(Expression::String("x".into()).as_string(), Some("x"));
        assert_eq!(Expression::Int(-3).as_int(), Some(-3));
        assert_eq!(Expression::Boolean(false).as_bool(), Some(false));
        assert_eq!(Expression::Int(1).as_string(), None);
    }

    #[test]
    fn test_expression_as_ident() {
        assert_eq!(path(&["APPLE"]).as_ident(), Some("APPLE"));
        assert_eq!(path(&["db", "Text"]).as_ident(), None);
        assert_eq!(path(&["db", "Text"]).as_path().map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_expression_kind() {
        assert_eq!(Expression::Array(vec![]).kind(), "array");
        assert_eq!(
            Expression::Function(FunctionCall::new("now", vec![])).kind(),
            "function call"
        );
    }

    // ==================== FunctionCall Tests ====================

    #[test]
    fn test_function_base_name() {
        assert_eq!(FunctionCall::new("env", vec![]).base_name(), "env");
        assert_eq!(FunctionCall::new("prisma.env", vec![]).base_name(), "env");
    }

    // ==================== Attribute Tests ====================

    #[test]
    fn test_attribute_named_args() {
        let attr = Attribute::new(
            Ident::new("relation", span()),
            vec![
                Argument::positional(Expression::String("rel".into()), span()),
                Argument::named(
                    Ident::new("fields", span()),
                    Expression::Array(vec![path(&["author_id"])]),
                    span(),
                ),
            ],
            span(),
        );

        assert!(attr.is("relation"));
        assert!(attr.has_arg("fields"));
        assert!(!attr.has_arg("references"));
        assert_eq!(
            attr.first_positional().and_then(|v| v.as_string()),
            Some("rel")
        );
        assert_eq!(
            attr.get_arg("fields").and_then(|v| v.as_array()).map(|a| a.len()),
            Some(1)
        );
    }

    #[test]
    fn test_attribute_get_arg_mut() {
        let mut attr = Attribute::new(
            Ident::new("unique", span()),
            vec![Argument::named(
                Ident::new("map", span()),
                Expression::String("old".into()),
                span(),
            )],
            span(),
        );

        *attr.get_arg_mut("map").unwrap() = Expression::String("new".into());
        assert_eq!(attr.get_arg("map").and_then(|v| v.as_string()), Some("new"));
    }
}
