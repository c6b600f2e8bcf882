//! Render a schema AST back into `.prisma` text.
//!
//! The output is normalized rather than byte-preserving: members are indented
//! with two spaces, tokens are separated by single spaces and blank lines inside
//! blocks are dropped. Top-level declarations are separated by one blank line.

use crate::ast::*;

const INDENT: &str = "  ";

/// Render a schema into text.
pub fn render_schema(schema: &Schema) -> String {
    if schema.declarations.is_empty() {
        return String::new();
    }

    let sections: Vec<String> = schema.declarations.iter().map(render_declaration).collect();

    let mut output = sections.join("\n\n");
    output.push('\n');
    output
}

fn render_declaration(declaration: &Declaration) -> String {
    let mut output = String::new();
    match declaration {
        Declaration::Config(block) => format_config(&mut output, block),
        Declaration::Model(model) => format_model(&mut output, model),
        Declaration::Enum(enum_def) => format_enum(&mut output, enum_def),
        Declaration::Comments(block) => format_comment_block(&mut output, block),
    }
    output
}

fn format_comment_block(output: &mut String, block: &CommentBlock) {
    let lines: Vec<String> = block
        .comments
        .iter()
        .filter(|c| !c.is_empty())
        .map(format_comment)
        .collect();
    output.push_str(&lines.join("\n"));
}

fn format_config(output: &mut String, block: &ConfigBlock) {
    output.push_str(&format!("{} {} {{\n", block.kind.as_str(), block.name.as_str()));

    for member in &block.members {
        match member {
            ConfigMember::Property(property) => {
                output.push_str(&format!(
                    "{}{} = {}",
                    INDENT,
                    property.name.as_str(),
                    format_expression(&property.value)
                ));
                push_trailing_comment(output, property.comment.as_ref());
                output.push('\n');
            }
            ConfigMember::Comment(comment) => push_standalone_comment(output, comment),
        }
    }

    output.push('}');
}

fn format_model(output: &mut String, model: &Model) {
    output.push_str(&format!("model {} {{\n", model.name()));

    for member in &model.members {
        match member {
            ModelMember::Field(field) => {
                output.push_str(&format!(
                    "{}{} {}",
                    INDENT,
                    field.name(),
                    format_field_type(&field.field_type, field.modifier)
                ));
                for attr in &field.attributes {
                    output.push_str(&format!(" {}", format_attribute("@", attr)));
                }
                push_trailing_comment(output, field.comment.as_ref());
                output.push('\n');
            }
            ModelMember::Attribute(block_attr) => format_block_attribute(output, block_attr),
            ModelMember::Comment(comment) => push_standalone_comment(output, comment),
        }
    }

    output.push('}');
}

fn format_enum(output: &mut String, enum_def: &Enum) {
    output.push_str(&format!("enum {} {{\n", enum_def.name()));

    for member in &enum_def.members {
        match member {
            EnumMember::Value(value) => {
                output.push_str(&format!("{}{}", INDENT, value.name()));
                for attr in &value.attributes {
                    output.push_str(&format!(" {}", format_attribute("@", attr)));
                }
                push_trailing_comment(output, value.comment.as_ref());
                output.push('\n');
            }
            EnumMember::Attribute(block_attr) => format_block_attribute(output, block_attr),
            EnumMember::Comment(comment) => push_standalone_comment(output, comment),
        }
    }

    output.push('}');
}

fn format_block_attribute(output: &mut String, block_attr: &BlockAttribute) {
    output.push_str(INDENT);
    output.push_str(&format_attribute("@@", &block_attr.attribute));
    push_trailing_comment(output, block_attr.comment.as_ref());
    output.push('\n');
}

/// A cleared standalone comment still occupies its line.
fn push_standalone_comment(output: &mut String, comment: &Comment) {
    if !comment.is_empty() {
        output.push_str(INDENT);
        output.push_str(&format_comment(comment));
    }
    output.push('\n');
}

fn push_trailing_comment(output: &mut String, comment: Option<&Comment>) {
    if let Some(comment) = comment {
        output.push(' ');
        if comment.is_empty() {
            output.push_str("//");
        } else {
            output.push_str(&format_comment(comment));
        }
    }
}

fn format_comment(comment: &Comment) -> String {
    if comment.is_empty() {
        comment.kind.marker().to_string()
    } else {
        format!("{} {}", comment.kind.marker(), comment.text)
    }
}

fn format_field_type(field_type: &FieldType, modifier: TypeModifier) -> String {
    let base = match field_type {
        FieldType::Scalar(scalar) => scalar.as_str().to_string(),
        FieldType::Named(name) => name.as_str().to_string(),
        FieldType::Unsupported(raw) => format!("Unsupported(\"{}\")", raw),
    };

    format!("{}{}", base, modifier.suffix())
}

fn format_attribute(prefix: &str, attr: &Attribute) -> String {
    if attr.args.is_empty() {
        format!("{}{}", prefix, attr.name())
    } else {
        format!("{}{}({})", prefix, attr.name(), format_arguments(&attr.args))
    }
}

fn format_arguments(args: &[Argument]) -> String {
    args.iter()
        .map(|arg| match &arg.name {
            Some(name) => format!("{}: {}", name.as_str(), format_expression(&arg.value)),
            None => format_expression(&arg.value),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_expression(value: &Expression) -> String {
    match value {
        Expression::String(s) => format!("\"{}\"", s),
        Expression::Int(i) => i.to_string(),
        Expression::Number(raw) => raw.to_string(),
        Expression::Boolean(b) => b.to_string(),
        Expression::Path(segments) => segments
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("."),
        Expression::Function(call) => format!("{}({})", call.name, format_arguments(&call.args)),
        Expression::Array(items) => {
            let item_strs: Vec<String> = items.iter().map(format_expression).collect();
            format!("[{}]", item_strs.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_schema;
    use pretty_assertions::assert_eq;

    fn normalize(input: &str) -> String {
        render_schema(&parse_schema(input).unwrap())
    }

    #[test]
    fn test_render_collapses_alignment() {
        let output = normalize(
            r#"
            model stuff_model {
                id   Int  @id @default(autoincrement())
                prop Int?
            }
        "#,
        );

        assert_eq!(
            output,
            "model stuff_model {\n  id Int @id @default(autoincrement())\n  prop Int?\n}\n"
        );
    }

    #[test]
    fn test_render_config_block() {
        let output = normalize(
            r#"
            datasource db {
                provider = "postgresql"
                url      = env("DB_URL")
            }
        "#,
        );

        assert_eq!(
            output,
            "datasource db {\n  provider = \"postgresql\"\n  url = env(\"DB_URL\")\n}\n"
        );
    }

    #[test]
    fn test_render_separates_declarations() {
        let output = normalize(
            "enum FRUIT {\n  APPLE\n  ORANGE\n}\nmodel a {\n  fruit FRUIT @default(APPLE)\n}\n",
        );

        assert_eq!(
            output,
            "enum FRUIT {\n  APPLE\n  ORANGE\n}\n\nmodel a {\n  fruit FRUIT @default(APPLE)\n}\n"
        );
    }

    #[test]
    fn test_render_drops_blank_lines_in_blocks() {
        let output = normalize(
            r#"
            model stuff_model {
                id         Int @id
                some_field Int

                @@index([some_field], map: "index_some_field")
            }
        "#,
        );

        assert_eq!(
            output,
            "model stuff_model {\n  id Int @id\n  some_field Int\n  @@index([some_field], map: \"index_some_field\")\n}\n"
        );
    }

    #[test]
    fn test_render_attribute_arguments() {
        let output = normalize(
            r#"
            model Post {
                author User @relation("PostAuthor", fields: [authorId], references: [id], onDelete: Cascade)
                price  Float @default(9.5) @db.Decimal(10, 2)
                tags   String[] @default([])
                at     DateTime @default(dbgenerated("now() at time zone 'utc'"))
            }
        "#,
        );

        assert_eq!(
            output,
            concat!(
                "model Post {\n",
                "  author User @relation(\"PostAuthor\", fields: [authorId], references: [id], onDelete: Cascade)\n",
                "  price Float @default(9.5) @db.Decimal(10, 2)\n",
                "  tags String[] @default([])\n",
                "  at DateTime @default(dbgenerated(\"now() at time zone 'utc'\"))\n",
                "}\n",
            )
        );
    }

    #[test]
    fn test_render_comments() {
        let output = normalize(
            r#"
            // header
            model stuff_model {
                id Int @id // trailing
                /// documented
                more Int
            }
        "#,
        );

        assert_eq!(
            output,
            "// header\n\nmodel stuff_model {\n  id Int @id // trailing\n  /// documented\n  more Int\n}\n"
        );
    }

    #[test]
    fn test_render_cleared_comments() {
        let mut schema = parse_schema(
            r#"
            // header
            model stuff_model {
                id Int @id // trailing
                // standalone
                more Int
            }
        "#,
        )
        .unwrap();

        for declaration in &mut schema.declarations {
            match declaration {
                Declaration::Comments(block) => block.comments.clear(),
                Declaration::Model(model) => {
                    for member in &mut model.members {
                        match member {
                            ModelMember::Field(field) => {
                                if let Some(comment) = field.comment.as_mut() {
                                    comment.clear();
                                }
                            }
                            ModelMember::Comment(comment) => comment.clear(),
                            ModelMember::Attribute(_) => {}
                        }
                    }
                }
                _ => {}
            }
        }

        assert_eq!(
            render_schema(&schema),
            "\n\nmodel stuff_model {\n  id Int @id //\n\n  more Int\n}\n"
        );
    }

    #[test]
    fn test_render_numbers_as_written() {
        let input = concat!(
            "generator client {\n",
            "  provider = \"prisma-client-js\"\n",
            "  v = 1.10\n",
            "}\n",
            "\n",
            "model a {\n",
            "  big BigInt @default(9223372036854775808)\n",
            "  tiny Decimal @default(0.0000000001)\n",
            "  neg Int @default(-7)\n",
            "}\n",
        );
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_render_unsupported_and_optional_list() {
        let output = normalize("model a {\n  shape Unsupported(\"circle\")?\n}\n");
        assert_eq!(output, "model a {\n  shape Unsupported(\"circle\")?\n}\n");
    }

    #[test]
    fn test_render_empty_schema() {
        assert_eq!(render_schema(&Schema::new()), "");
    }

    #[test]
    fn test_render_is_stable() {
        let once = normalize(
            r#"
            datasource db {
                provider = "postgresql"
            }

            enum Role {
                USER
                ADMIN @map("admin")
            }

            model User {
                id   Int  @id @default(autoincrement())
                role Role @default(USER)

                @@map("users")
            }
        "#,
        );
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }
}
