//! First pass: rename every declaration site.
//!
//! Models, fields, enums, enum values, declared relation names and `env()`
//! arguments receive synthetic names here and are recorded in the registry.
//! Comments are cleared. Nothing is resolved yet, so forward references are
//! left for the second pass.

use veil_schema::ast::*;

use crate::error::{ObfuscateError, ObfuscateResult};
use crate::registry::NamingRegistry;

/// Rename all declarations of a schema in document order.
pub(crate) fn rename_declarations(
    schema: &mut Schema,
    registry: &mut NamingRegistry,
) -> ObfuscateResult<()> {
    for declaration in &mut schema.declarations {
        match declaration {
            Declaration::Config(block) => rename_config(block, registry),
            Declaration::Model(model) => rename_model(model, registry)?,
            Declaration::Enum(enum_def) => rename_enum(enum_def, registry)?,
            Declaration::Comments(block) => block.comments.clear(),
        }
    }

    Ok(())
}

fn rename_config(block: &mut ConfigBlock, registry: &mut NamingRegistry) {
    for member in &mut block.members {
        match member {
            ConfigMember::Property(property) => {
                rewrite_env_calls(&mut property.value, registry);
                clear_comment(property.comment.as_mut());
            }
            ConfigMember::Comment(comment) => comment.clear(),
        }
    }
}

fn rename_model(model: &mut Model, registry: &mut NamingRegistry) -> ObfuscateResult<()> {
    let original = model.name.name.clone();
    let synthetic = registry
        .register_model(&original)
        .map_err(|e| e.at_line(model.name.span.line))?;
    model.name.rename(synthetic.clone());

    for member in &mut model.members {
        match member {
            ModelMember::Field(field) => rename_field(&synthetic, field, registry)?,
            ModelMember::Attribute(block) => {
                rewrite_attribute_env_calls(&mut block.attribute, registry);
                if block.attribute.is("unique") {
                    register_unique_shorthand(&synthetic, &mut block.attribute, registry)?;
                }
                clear_comment(block.comment.as_mut());
            }
            ModelMember::Comment(comment) => comment.clear(),
        }
    }

    Ok(())
}

fn rename_field(
    model: &str,
    field: &mut Field,
    registry: &mut NamingRegistry,
) -> ObfuscateResult<()> {
    let synthetic = registry
        .register_field(model, field.name())
        .map_err(|e| e.at_line(field.name.span.line))?;
    field.name.rename(synthetic.clone());

    for attr in &mut field.attributes {
        rewrite_attribute_env_calls(attr, registry);

        if attr.is("relation") {
            register_relation_name(model, attr, registry)?;
        } else if attr.is("unique") {
            rewrite_unique_map(model, &synthetic, attr)?;
        }
    }

    clear_comment(field.comment.as_mut());
    Ok(())
}

/// The declaring side of a named relation carries `fields`/`references`.
fn register_relation_name(
    model: &str,
    attr: &mut Attribute,
    registry: &mut NamingRegistry,
) -> ObfuscateResult<()> {
    if !attr.has_arg("fields") && !attr.has_arg("references") {
        return Ok(());
    }

    let line = attr.span.line;
    if let Some(name) = relation_name_mut(attr) {
        let synthetic = registry
            .register_relation_name(model, name.as_str())
            .map_err(|e| e.at_line(line))?;
        *name = synthetic.to_string();
    }

    Ok(())
}

/// `@unique(map: "...")` is derived from the new model and field names.
fn rewrite_unique_map(model: &str, field: &str, attr: &mut Attribute) -> ObfuscateResult<()> {
    let line = attr.span.line;

    for arg in &mut attr.args {
        let Some(name) = &arg.name else {
            return Err(ObfuscateError::malformed(
                "@unique",
                format!("unexpected positional argument of kind '{}'", arg.value.kind()),
            )
            .at_line(line));
        };

        if name.as_str() != "map" {
            continue;
        }

        match &mut arg.value {
            Expression::String(value) => {
                *value = if value.contains('.') {
                    format!("{}.{}_unique", model, field)
                } else {
                    format!("{}_{}_unique", model, field)
                };
            }
            other => {
                return Err(ObfuscateError::malformed(
                    "@unique",
                    format!("expected a string for `map`, found {}", other.kind()),
                )
                .at_line(line));
            }
        }
    }

    Ok(())
}

/// `@@unique(name: "...", map: "...")` names act as field names of the model.
fn register_unique_shorthand(
    model: &str,
    attr: &mut Attribute,
    registry: &mut NamingRegistry,
) -> ObfuscateResult<()> {
    let line = attr.span.line;

    for arg in &mut attr.args {
        let Some(name) = &arg.name else {
            continue;
        };

        if !matches!(name.as_str(), "name" | "map") {
            return Err(ObfuscateError::malformed(
                "@@unique",
                format!("unexpected named argument '{}'", name),
            )
            .at_line(line));
        }

        let value = match &mut arg.value {
            Expression::String(value) => value,
            other => {
                return Err(ObfuscateError::malformed(
                    "@@unique",
                    format!("expected a string for `{}`, found {}", name, other.kind()),
                )
                .at_line(line));
            }
        };

        let synthetic = registry
            .ensure_field(model, value.as_str())
            .map_err(|e| e.at_line(line))?;
        *value = synthetic.to_string();
    }

    Ok(())
}

fn rename_enum(enum_def: &mut Enum, registry: &mut NamingRegistry) -> ObfuscateResult<()> {
    let original = enum_def.name.name.clone();
    let synthetic = registry
        .register_enum(&original)
        .map_err(|e| e.at_line(enum_def.name.span.line))?;
    enum_def.name.rename(synthetic.clone());

    for member in &mut enum_def.members {
        match member {
            EnumMember::Value(value) => {
                let new_value = registry
                    .register_enum_value(&synthetic, value.name())
                    .map_err(|e| e.at_line(value.name.span.line))?;
                value.name.rename(new_value);

                for attr in &mut value.attributes {
                    rewrite_attribute_env_calls(attr, registry);
                }
                clear_comment(value.comment.as_mut());
            }
            EnumMember::Attribute(block) => {
                rewrite_attribute_env_calls(&mut block.attribute, registry);
                clear_comment(block.comment.as_mut());
            }
            EnumMember::Comment(comment) => comment.clear(),
        }
    }

    Ok(())
}

/// The relation name: the first positional string, or a `name:` argument.
pub(crate) fn relation_name_mut(attr: &mut Attribute) -> Option<&mut String> {
    attr.args
        .iter_mut()
        .find(|arg| {
            (arg.is_positional() || arg.is_named("name"))
                && matches!(arg.value, Expression::String(_))
        })
        .and_then(|arg| match &mut arg.value {
            Expression::String(name) => Some(name),
            _ => None,
        })
}

fn rewrite_attribute_env_calls(attr: &mut Attribute, registry: &mut NamingRegistry) {
    for arg in &mut attr.args {
        rewrite_env_calls(&mut arg.value, registry);
    }
}

/// Replace the literal argument of every `env(...)` call, innermost first.
fn rewrite_env_calls(value: &mut Expression, registry: &mut NamingRegistry) {
    match value {
        Expression::Function(call) => {
            for arg in &mut call.args {
                rewrite_env_calls(&mut arg.value, registry);
            }

            if call.base_name() == "env" {
                if let Some(first) = call.args.first_mut() {
                    if first.value.is_literal() {
                        first.value = Expression::String(registry.register_env_var().to_string());
                    }
                }
            }
        }
        Expression::Array(items) => {
            for item in items {
                rewrite_env_calls(item, registry);
            }
        }
        _ => {}
    }
}

fn clear_comment(comment: Option<&mut Comment>) {
    if let Some(comment) = comment {
        comment.clear();
    }
}
