//! Second pass: rewrite every reference site.
//!
//! Runs after all declarations were renamed, so a reference may point at a
//! declaration further down the document. The registry is read-only here.

use smol_str::SmolStr;
use veil_schema::ast::*;

use crate::declarations::relation_name_mut;
use crate::error::{ObfuscateError, ObfuscateResult};
use crate::registry::NamingRegistry;

/// Rewrite all references of a schema whose declarations were renamed.
pub(crate) fn rewrite_references(
    schema: &mut Schema,
    registry: &NamingRegistry,
) -> ObfuscateResult<()> {
    for declaration in &mut schema.declarations {
        if let Declaration::Model(model) = declaration {
            rewrite_model(model, registry)?;
        }
    }

    Ok(())
}

fn rewrite_model(model: &mut Model, registry: &NamingRegistry) -> ObfuscateResult<()> {
    let model_name = model.name.name.clone();
    let mut index_counter = 0;

    for member in &mut model.members {
        match member {
            ModelMember::Field(field) => rewrite_field(&model_name, field, registry)?,
            ModelMember::Attribute(block) => {
                let attr = &mut block.attribute;
                if attr.is("index") {
                    rewrite_index(&model_name, index_counter, attr, registry)?;
                    index_counter += 1;
                } else if attr.is("id") {
                    rewrite_id(&model_name, attr, registry)?;
                } else if attr.is("unique") {
                    rewrite_unique(&model_name, attr, registry)?;
                }
            }
            ModelMember::Comment(_) => {}
        }
    }

    Ok(())
}

/// Where a field points: its scalar type, or the synthetic model/enum name.
struct FieldContext<'a> {
    model: &'a str,
    field: &'a str,
    scalar: Option<ScalarType>,
    target: Option<SmolStr>,
    type_name: String,
}

fn rewrite_field(model: &str, field: &mut Field, registry: &NamingRegistry) -> ObfuscateResult<()> {
    if let FieldType::Named(type_ident) = &mut field.field_type {
        // `Unsupported` without its parenthesized form is still built in.
        if type_ident.as_str() != "Unsupported" {
            let synthetic = registry
                .resolve_model_or_enum(type_ident.as_str())
                .map_err(|e| e.at_line(type_ident.span.line))?;
            type_ident.rename(synthetic);
        }
    }

    let context = FieldContext {
        model,
        field: field.name.as_str(),
        scalar: field.field_type.scalar(),
        target: field.field_type.reference().map(|ident| ident.name.clone()),
        type_name: field.field_type.to_string(),
    };

    for attr in &mut field.attributes {
        if attr.is("default") {
            rewrite_default(&context, attr, registry)?;
        } else if attr.is("relation") {
            rewrite_relation(&context, attr, registry)?;
        }
    }

    Ok(())
}

fn rewrite_default(
    context: &FieldContext<'_>,
    attr: &mut Attribute,
    registry: &NamingRegistry,
) -> ObfuscateResult<()> {
    let line = attr.span.line;
    let Some(arg) = attr.args.first_mut() else {
        return Err(ObfuscateError::malformed(
            "@default",
            format!("no value for field '{}'", context.field),
        )
        .at_line(line));
    };

    rewrite_default_value(context, &mut arg.value, registry, true).map_err(|e| e.at_line(line))
}

fn rewrite_default_value(
    context: &FieldContext<'_>,
    value: &mut Expression,
    registry: &NamingRegistry,
    top_level: bool,
) -> ObfuscateResult<()> {
    match value {
        Expression::String(_)
        | Expression::Int(_)
        | Expression::Number(_)
        | Expression::Boolean(_) => {
            *value = placeholder(context.scalar).ok_or_else(|| {
                ObfuscateError::UnsupportedDefault {
                    field: context.field.to_string(),
                    field_type: context.type_name.clone(),
                    line: None,
                }
            })?;
        }
        Expression::Path(segments) => {
            let enum_name = context
                .target
                .as_deref()
                .filter(|target| registry.is_enum(target))
                .ok_or_else(|| ObfuscateError::InconsistentDefault {
                    field: context.field.to_string(),
                    field_type: context.type_name.clone(),
                    line: None,
                })?;

            let len = segments.len();
            let [original] = segments.as_mut_slice() else {
                return Err(ObfuscateError::malformed(
                    "@default",
                    format!(
                        "expected a single enum value on field '{}', found a path of length {}",
                        context.field, len
                    ),
                ));
            };
            *original = registry.resolve_enum_value(enum_name, original.as_str())?;
        }
        Expression::Function(call) => {
            if call.name == "dbgenerated" && context.scalar == Some(ScalarType::DateTime) {
                *call = FunctionCall::new("now", vec![]);
            }
        }
        Expression::Array(items) if top_level => {
            for item in items {
                rewrite_default_value(context, item, registry, false)?;
            }
        }
        Expression::Array(_) => {
            return Err(ObfuscateError::malformed(
                "@default",
                format!("nested array on field '{}'", context.field),
            ));
        }
    }

    Ok(())
}

/// The literal that replaces a literal default of the given type.
fn placeholder(scalar: Option<ScalarType>) -> Option<Expression> {
    match scalar? {
        ScalarType::String => Some(Expression::String("DEFAULT".to_string())),
        ScalarType::Int => Some(Expression::Int(0)),
        ScalarType::Boolean => Some(Expression::Boolean(false)),
        ScalarType::Json => Some(Expression::String("[]".to_string())),
        _ => None,
    }
}

fn rewrite_relation(
    context: &FieldContext<'_>,
    attr: &mut Attribute,
    registry: &NamingRegistry,
) -> ObfuscateResult<()> {
    let line = attr.span.line;

    if attr.args.is_empty() {
        return Err(ObfuscateError::malformed(
            "@relation",
            format!("no arguments on field '{}'", context.field),
        )
        .at_line(line));
    }

    if let Some(map) = attr.get_arg_mut("map") {
        match map {
            Expression::String(value) => *value = format!("{}_mapped", context.field),
            other => {
                return Err(ObfuscateError::malformed(
                    "@relation",
                    format!("expected a string for `map`, found {}", other.kind()),
                )
                .at_line(line));
            }
        }
    }

    let has_fields = attr.has_arg("fields");
    let has_references = attr.has_arg("references");

    // A bare relation name refers to the side that declared it.
    if !has_fields && !has_references {
        if let Some(name) = relation_name_mut(attr) {
            let target = context.target.as_deref().unwrap_or_default();
            let synthetic = registry
                .resolve_relation_name(target, name.as_str())
                .map_err(|e| e.at_line(line))?;
            *name = synthetic.to_string();
            return Ok(());
        }
    }

    let target = context
        .target
        .as_deref()
        .filter(|target| registry.is_model(target))
        .ok_or_else(|| {
            ObfuscateError::malformed(
                "@relation",
                format!("field '{}' does not point at a model", context.field),
            )
            .at_line(line)
        })?;

    for (arg_name, scope) in [("references", target), ("fields", context.model)] {
        let list = attr.get_arg_mut(arg_name).ok_or_else(|| {
            ObfuscateError::malformed(
                "@relation",
                format!("missing `{}` on field '{}'", arg_name, context.field),
            )
            .at_line(line)
        })?;
        rewrite_field_list("@relation", list, scope, registry).map_err(|e| e.at_line(line))?;
    }

    Ok(())
}

fn rewrite_index(
    model: &str,
    index: usize,
    attr: &mut Attribute,
    registry: &NamingRegistry,
) -> ObfuscateResult<()> {
    let line = attr.span.line;

    let Some(fields) = attr.args.first_mut() else {
        return Err(ObfuscateError::malformed("@@index", "no arguments").at_line(line));
    };
    rewrite_field_list("@@index", &mut fields.value, model, registry)
        .map_err(|e| e.at_line(line))?;

    match attr.args.get_mut(1) {
        Some(arg) if arg.is_named("map") => match &mut arg.value {
            Expression::String(value) => *value = format!("{}_index_{}", model, index),
            other => {
                return Err(ObfuscateError::malformed(
                    "@@index",
                    format!("expected a string for `map`, found {}", other.kind()),
                )
                .at_line(line));
            }
        },
        _ => {
            return Err(ObfuscateError::malformed(
                "@@index",
                "expected a `map` name as the second argument",
            )
            .at_line(line));
        }
    }

    Ok(())
}

/// Only the field list is rewritten. A `map`/`name` argument here, like `@map`,
/// `@@map` and `@default(map:)`, is kept as written and may still carry a
/// database table, column or constraint name.
fn rewrite_id(model: &str, attr: &mut Attribute, registry: &NamingRegistry) -> ObfuscateResult<()> {
    let line = attr.span.line;

    let Some(fields) = attr.args.first_mut() else {
        return Err(ObfuscateError::malformed("@@id", "no arguments").at_line(line));
    };
    rewrite_field_list("@@id", &mut fields.value, model, registry).map_err(|e| e.at_line(line))
}

fn rewrite_unique(
    model: &str,
    attr: &mut Attribute,
    registry: &NamingRegistry,
) -> ObfuscateResult<()> {
    let line = attr.span.line;

    for arg in &mut attr.args {
        if matches!(arg.value, Expression::Array(_)) {
            rewrite_field_list("@@unique", &mut arg.value, model, registry)
                .map_err(|e| e.at_line(line))?;
        }
    }

    Ok(())
}

/// Rewrite `[a, b, ...]` where every item is a field of `model`.
fn rewrite_field_list(
    attribute: &str,
    list: &mut Expression,
    model: &str,
    registry: &NamingRegistry,
) -> ObfuscateResult<()> {
    let items = match list {
        Expression::Array(items) => items,
        other => {
            return Err(ObfuscateError::malformed(
                attribute,
                format!("expected a list of field names, found {}", other.kind()),
            ));
        }
    };

    for item in items {
        match item {
            Expression::Path(segments) if segments.len() == 1 => {
                segments[0] = registry.resolve_field(model, &segments[0])?;
            }
            other => {
                return Err(ObfuscateError::malformed(
                    attribute,
                    format!("expected a field name, found {}", describe(other)),
                ));
            }
        }
    }

    Ok(())
}

fn describe(value: &Expression) -> String {
    match value {
        Expression::Path(segments) => format!("path '{}'", segments.join(".")),
        other => other.kind().to_string(),
    }
}
