//! Schema parser for `.prisma` files.

mod grammar;

use std::path::Path;

use pest::Parser;
use pest::iterators::{Pair, Pairs};
use smol_str::SmolStr;

use crate::ast::*;
use crate::error::{SchemaError, SchemaResult};

pub use grammar::{Rule, SchemaParser};

/// Parse a schema from a string.
pub fn parse_schema(input: &str) -> SchemaResult<Schema> {
    let mut pairs =
        SchemaParser::parse(Rule::schema, input).map_err(|e| syntax_error(input, e))?;

    let builder = AstBuilder { src: input };
    let schema_pair = builder.next(&mut pairs, Span::new(0, input.len(), 1), "schema")?;
    builder.schema(schema_pair)
}

/// Parse a schema from a file.
pub fn parse_schema_file(path: impl AsRef<Path>) -> SchemaResult<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_schema(&content)
}

fn syntax_error(input: &str, err: pest::error::Error<Rule>) -> SchemaError {
    let (offset, len) = match err.location {
        pest::error::InputLocation::Pos(pos) => (pos, 0),
        pest::error::InputLocation::Span((start, end)) => (start, end - start),
    };
    let line = match err.line_col {
        pest::error::LineColLocation::Pos((line, _)) => line,
        pest::error::LineColLocation::Span((line, _), _) => line,
    };
    SchemaError::syntax(input, offset, len, line, err.variant.message().to_string())
}

fn span_of(pair: &Pair<'_, Rule>) -> Span {
    let span = pair.as_span();
    let (line, _) = span.start_pos().line_col();
    Span::new(span.start(), span.end(), line)
}

fn ident_of(pair: &Pair<'_, Rule>) -> Ident {
    Ident::new(pair.as_str(), span_of(pair))
}

/// Turns pest pairs into AST nodes.
///
/// Holds the source text so structural surprises can still be reported as
/// located syntax errors.
struct AstBuilder<'s> {
    src: &'s str,
}

impl<'s> AstBuilder<'s> {
    fn error(&self, span: Span, message: impl Into<String>) -> SchemaError {
        SchemaError::syntax(self.src, span.start, span.len(), span.line, message)
    }

    fn next<'i>(
        &self,
        pairs: &mut Pairs<'i, Rule>,
        parent: Span,
        what: &str,
    ) -> SchemaResult<Pair<'i, Rule>> {
        pairs
            .next()
            .ok_or_else(|| self.error(parent, format!("expected {}", what)))
    }

    fn schema(&self, pair: Pair<'_, Rule>) -> SchemaResult<Schema> {
        let mut schema = Schema::new();

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::comment_block => schema.push(Declaration::Comments(self.comment_block(item)?)),
                Rule::config_block => schema.push(Declaration::Config(self.config_block(item)?)),
                Rule::model_def => schema.push(Declaration::Model(self.model(item)?)),
                Rule::enum_def => schema.push(Declaration::Enum(self.enum_def(item)?)),
                _ => {}
            }
        }

        Ok(schema)
    }

    fn comment(&self, pair: Pair<'_, Rule>) -> Comment {
        let span = span_of(&pair);
        let kind = if pair.as_rule() == Rule::doc_comment {
            CommentKind::Doc
        } else {
            CommentKind::Line
        };
        let text = pair
            .into_inner()
            .next()
            .map(|p| p.as_str().trim())
            .unwrap_or_default();
        Comment::new(kind, text, span)
    }

    fn is_comment(pair: &Pair<'_, Rule>) -> bool {
        matches!(pair.as_rule(), Rule::doc_comment | Rule::line_comment)
    }

    fn comment_block(&self, pair: Pair<'_, Rule>) -> SchemaResult<CommentBlock> {
        let span = span_of(&pair);
        let comments = pair.into_inner().map(|p| self.comment(p)).collect();
        Ok(CommentBlock::new(comments, span))
    }

    /// Parse a datasource or generator block.
    fn config_block(&self, pair: Pair<'_, Rule>) -> SchemaResult<ConfigBlock> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();

        let keyword = self.next(&mut inner, span, "block keyword")?;
        let kind = ConfigKind::from_str(keyword.as_str())
            .ok_or_else(|| self.error(span_of(&keyword), "unknown block keyword"))?;
        let name = ident_of(&self.next(&mut inner, span, "block name")?);

        let mut block = ConfigBlock::new(kind, name, span);

        for item in inner {
            match item.as_rule() {
                Rule::config_property => {
                    let property = self.property(item)?;
                    block.members.push(ConfigMember::Property(property));
                }
                _ if Self::is_comment(&item) => {
                    block.members.push(ConfigMember::Comment(self.comment(item)));
                }
                _ => {}
            }
        }

        Ok(block)
    }

    fn property(&self, pair: Pair<'_, Rule>) -> SchemaResult<Property> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();

        let name = ident_of(&self.next(&mut inner, span, "property name")?);
        let value = self.expression(self.next(&mut inner, span, "property value")?)?;

        let mut property = Property::new(name, value, span);
        property.comment = inner.next().map(|c| self.comment(c));
        Ok(property)
    }

    /// Parse a model definition.
    fn model(&self, pair: Pair<'_, Rule>) -> SchemaResult<Model> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();

        self.next(&mut inner, span, "`model`")?;
        let name = ident_of(&self.next(&mut inner, span, "model name")?);

        let mut model = Model::new(name, span);

        for item in inner {
            match item.as_rule() {
                Rule::field_def => model.push(ModelMember::Field(self.field(item)?)),
                Rule::block_attribute_def => {
                    model.push(ModelMember::Attribute(self.block_attribute(item)?))
                }
                _ if Self::is_comment(&item) => {
                    model.push(ModelMember::Comment(self.comment(item)))
                }
                _ => {}
            }
        }

        Ok(model)
    }

    /// Parse an enum definition.
    fn enum_def(&self, pair: Pair<'_, Rule>) -> SchemaResult<Enum> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();

        self.next(&mut inner, span, "`enum`")?;
        let name = ident_of(&self.next(&mut inner, span, "enum name")?);

        let mut e = Enum::new(name, span);

        for item in inner {
            match item.as_rule() {
                Rule::enum_value => e.push(EnumMember::Value(self.enum_value(item)?)),
                Rule::block_attribute_def => {
                    e.push(EnumMember::Attribute(self.block_attribute(item)?))
                }
                _ if Self::is_comment(&item) => e.push(EnumMember::Comment(self.comment(item))),
                _ => {}
            }
        }

        Ok(e)
    }

    fn enum_value(&self, pair: Pair<'_, Rule>) -> SchemaResult<EnumValue> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();

        let name = ident_of(&self.next(&mut inner, span, "enum value")?);
        let mut value = EnumValue::new(name, span);

        for item in inner {
            if item.as_rule() == Rule::field_attribute {
                value.attributes.push(self.attribute(item)?);
            } else if Self::is_comment(&item) {
                value.comment = Some(self.comment(item));
            }
        }

        Ok(value)
    }

    /// Parse a field definition.
    fn field(&self, pair: Pair<'_, Rule>) -> SchemaResult<Field> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();

        let name = ident_of(&self.next(&mut inner, span, "field name")?);
        let (field_type, modifier) =
            self.field_type(self.next(&mut inner, span, "field type")?)?;

        let mut attributes = vec![];
        let mut comment = None;
        for item in inner {
            if item.as_rule() == Rule::field_attribute {
                attributes.push(self.attribute(item)?);
            } else if Self::is_comment(&item) {
                comment = Some(self.comment(item));
            }
        }

        let mut field = Field::new(name, field_type, modifier, attributes, span);
        field.comment = comment;
        Ok(field)
    }

    /// Parse a field type with optional modifier.
    fn field_type(&self, pair: Pair<'_, Rule>) -> SchemaResult<(FieldType, TypeModifier)> {
        let span = span_of(&pair);
        let mut field_type = None;
        let mut modifier = TypeModifier::Required;

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::identifier => {
                    field_type = Some(match ScalarType::from_str(item.as_str()) {
                        Some(scalar) => FieldType::Scalar(scalar),
                        None => FieldType::Named(ident_of(&item)),
                    });
                }
                Rule::unsupported_type => {
                    let raw = item
                        .into_inner()
                        .next()
                        .and_then(|literal| literal.into_inner().next())
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_default();
                    field_type = Some(FieldType::Unsupported(raw));
                }
                Rule::list_marker => {
                    modifier = if modifier == TypeModifier::Optional {
                        TypeModifier::OptionalList
                    } else {
                        TypeModifier::List
                    };
                }
                Rule::optional_marker => {
                    modifier = if modifier == TypeModifier::List {
                        TypeModifier::OptionalList
                    } else {
                        TypeModifier::Optional
                    };
                }
                _ => {}
            }
        }

        let field_type = field_type.ok_or_else(|| self.error(span, "expected type name"))?;
        Ok((field_type, modifier))
    }

    fn block_attribute(&self, pair: Pair<'_, Rule>) -> SchemaResult<BlockAttribute> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();

        let attribute = self.attribute(self.next(&mut inner, span, "block attribute")?)?;
        let mut block = BlockAttribute::new(attribute);
        block.comment = inner.next().map(|c| self.comment(c));
        Ok(block)
    }

    /// Parse an attribute (`@name(...)` or `@@name(...)`).
    fn attribute(&self, pair: Pair<'_, Rule>) -> SchemaResult<Attribute> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();

        let name = ident_of(&self.next(&mut inner, span, "attribute name")?);
        let args = match inner.next() {
            Some(args) => self.arguments(args)?,
            None => vec![],
        };

        Ok(Attribute::new(name, args, span))
    }

    /// Parse a parenthesized argument list.
    fn arguments(&self, pair: Pair<'_, Rule>) -> SchemaResult<Vec<Argument>> {
        pair.into_inner()
            .filter(|item| item.as_rule() == Rule::argument)
            .map(|item| self.argument(item))
            .collect()
    }

    /// Parse a single argument.
    fn argument(&self, pair: Pair<'_, Rule>) -> SchemaResult<Argument> {
        let span = span_of(&pair);
        let first = self.next(&mut pair.into_inner(), span, "argument")?;

        if first.as_rule() == Rule::named_argument {
            let mut inner = first.into_inner();
            let name = ident_of(&self.next(&mut inner, span, "argument name")?);
            let value = self.expression(self.next(&mut inner, span, "argument value")?)?;
            Ok(Argument::named(name, value, span))
        } else {
            Ok(Argument::positional(self.expression(first)?, span))
        }
    }

    /// Parse an expression.
    fn expression(&self, pair: Pair<'_, Rule>) -> SchemaResult<Expression> {
        let span = span_of(&pair);
        match pair.as_rule() {
            Rule::string_literal => Ok(Expression::String(
                pair.into_inner()
                    .next()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
            )),
            Rule::number => {
                let s = pair.as_str();
                Ok(s.parse()
                    .map(Expression::Int)
                    .unwrap_or_else(|_| Expression::Number(SmolStr::new(s))))
            }
            Rule::boolean => Ok(Expression::Boolean(pair.as_str() == "true")),
            Rule::path => Ok(Expression::Path(
                pair.as_str().split('.').map(SmolStr::new).collect(),
            )),
            Rule::function_call => {
                let mut inner = pair.into_inner();
                let name = SmolStr::new(self.next(&mut inner, span, "function name")?.as_str());
                let args = match inner.next() {
                    Some(args) => self.arguments(args)?,
                    None => vec![],
                };
                Ok(Expression::Function(FunctionCall::new(name, args)))
            }
            Rule::array => {
                let items: SchemaResult<Vec<_>> =
                    pair.into_inner().map(|p| self.expression(p)).collect();
                Ok(Expression::Array(items?))
            }
            other => Err(self.error(span, format!("unexpected {:?}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Basic Model Parsing ====================

    #[test]
    fn test_parse_simple_model() {
        let schema = parse_schema(
            r#"
            model stuff_model {
                id   Int  @id @default(autoincrement())
                prop Int?
            }
        "#,
        )
        .unwrap();

        assert_eq!(schema.models().count(), 1);
        let model = schema.get_model("stuff_model").unwrap();
        assert_eq!(model.fields().count(), 2);
        assert!(model.get_field("id").unwrap().has_attribute("id"));
        assert!(model.get_field("prop").unwrap().is_optional());
    }

    #[test]
    fn test_parse_declaration_order() {
        let schema = parse_schema(
            r#"
            datasource db {
                provider = "postgresql"
                url      = env("DB_URL")
            }

            enum FRUIT {
                APPLE
            }

            model stuff_model {
                id Int @id
            }

            generator client {
                provider = "prisma-client-js"
            }
        "#,
        )
        .unwrap();

        assert_eq!(
            schema.shape(),
            vec!["datasource", "enum", "model", "generator"]
        );
    }

    // ==================== Field Type Parsing ====================

    #[test]
    fn test_parse_all_scalar_types() {
        let schema = parse_schema(
            r#"
            model AllTypes {
                id       Int      @id
                big      BigInt
                float_f  Float
                decimal  Decimal
                str      String
                bool     Boolean
                datetime DateTime
                json     Json
                bytes    Bytes
                other    Unsupported("circle")
            }
        "#,
        )
        .unwrap();

        let model = schema.get_model("AllTypes").unwrap();
        assert_eq!(model.fields().count(), 10);
        assert_eq!(
            model.get_field("big").unwrap().field_type,
            FieldType::Scalar(ScalarType::BigInt)
        );
        assert_eq!(
            model.get_field("datetime").unwrap().field_type,
            FieldType::Scalar(ScalarType::DateTime)
        );
        assert_eq!(
            model.get_field("other").unwrap().field_type,
            FieldType::Unsupported("circle".to_string())
        );
    }

    #[test]
    fn test_parse_named_type_and_modifiers() {
        let schema = parse_schema(
            r#"
            model stuff_model {
                nested_list more_model[]
                nested      more_model?
            }
        "#,
        )
        .unwrap();

        let model = schema.get_model("stuff_model").unwrap();
        let list = model.get_field("nested_list").unwrap();
        assert!(list.is_list());
        assert_eq!(
            list.field_type.reference().map(|i| i.as_str()),
            Some("more_model")
        );
        assert!(model.get_field("nested").unwrap().is_optional());
    }

    // ==================== Attribute Parsing ====================

    #[test]
    fn test_parse_default_literals() {
        let schema = parse_schema(
            r#"
            model Config {
                name     String  @default("default value") @db.VarChar(255)
                minValue Int     @default(-100)
                price    Float   @default(9.99)
                enabled  Boolean @default(true)
            }
        "#,
        )
        .unwrap();

        let model = schema.get_model("Config").unwrap();
        let name = model.get_field("name").unwrap();
        assert_eq!(
            name.get_attribute("default").and_then(|a| a.first_arg()),
            Some(&Expression::String("default value".into()))
        );
        let native = name.get_attribute("db.VarChar").unwrap();
        assert_eq!(native.first_arg(), Some(&Expression::Int(255)));

        let min = model.get_field("minValue").unwrap();
        assert_eq!(
            min.get_attribute("default").and_then(|a| a.first_arg()),
            Some(&Expression::Int(-100))
        );
        let price = model.get_field("price").unwrap();
        assert_eq!(
            price.get_attribute("default").and_then(|a| a.first_arg()),
            Some(&Expression::Number("9.99".into()))
        );
        let enabled = model.get_field("enabled").unwrap();
        assert_eq!(
            enabled.get_attribute("default").and_then(|a| a.first_arg()),
            Some(&Expression::Boolean(true))
        );
    }

    #[test]
    fn test_parse_numbers_beyond_i64_keep_their_text() {
        let schema = parse_schema(
            r#"
            model Counter {
                big   BigInt  @default(9223372036854775808)
                ratio Decimal @default(1.10)
                max   BigInt  @default(9223372036854775807)
            }
        "#,
        )
        .unwrap();

        let model = schema.get_model("Counter").unwrap();
        let default_of = |name: &str| {
            model
                .get_field(name)
                .and_then(|f| f.get_attribute("default"))
                .and_then(|a| a.first_arg())
                .cloned()
        };
        assert_eq!(
            default_of("big"),
            Some(Expression::Number("9223372036854775808".into()))
        );
        assert_eq!(default_of("ratio"), Some(Expression::Number("1.10".into())));
        assert_eq!(default_of("max"), Some(Expression::Int(i64::MAX)));
    }

    #[test]
    fn test_parse_default_function_with_args() {
        let schema = parse_schema(
            r#"
            model stuff_model {
                entry DateTime @default(dbgenerated("now() at time zone 'utc'"))
            }
        "#,
        )
        .unwrap();

        let entry = schema
            .get_model("stuff_model")
            .and_then(|m| m.get_field("entry"))
            .unwrap();
        let call = entry
            .get_attribute("default")
            .and_then(|a| a.first_arg())
            .and_then(|v| v.as_function())
            .unwrap();
        assert_eq!(call.name.as_str(), "dbgenerated");
        assert_eq!(
            call.args[0].value.as_string(),
            Some("now() at time zone 'utc'")
        );
    }

    #[test]
    fn test_parse_relation_arguments() {
        let schema = parse_schema(
            r#"
            model Post {
                authorId Int
                author   User @relation("PostAuthor", fields: [authorId], references: [id], onDelete: Cascade)
            }
        "#,
        )
        .unwrap();

        let author = schema
            .get_model("Post")
            .and_then(|m| m.get_field("author"))
            .unwrap();
        let relation = author.get_attribute("relation").unwrap();
        assert_eq!(relation.args.len(), 4);
        assert_eq!(
            relation.first_positional().and_then(|v| v.as_string()),
            Some("PostAuthor")
        );
        assert_eq!(
            relation
                .get_arg("fields")
                .and_then(|v| v.as_array())
                .and_then(|items| items[0].as_ident()),
            Some("authorId")
        );
        assert_eq!(
            relation.get_arg("onDelete").and_then(|v| v.as_ident()),
            Some("Cascade")
        );
    }

    #[test]
    fn test_parse_block_attributes() {
        let schema = parse_schema(
            r#"
            model PostTag {
                postId Int
                tagId  Int

                @@id([postId, tagId])
                @@index([tagId], map: "tag_index")
                @@unique([postId, tagId], name: "post_tag", map: "post_tag")
            }
        "#,
        )
        .unwrap();

        let model = schema.get_model("PostTag").unwrap();
        assert!(model.has_attribute("id"));
        let index = model.get_attribute("index").unwrap();
        assert_eq!(index.args.len(), 2);
        assert_eq!(
            index.get_arg("map").and_then(|v| v.as_string()),
            Some("tag_index")
        );
        let unique = model.get_attribute("unique").unwrap();
        assert_eq!(unique.args.len(), 3);
    }

    #[test]
    fn test_parse_multiline_arguments() {
        let schema = parse_schema(
            r#"
            model stuff_model {
                a Int
                b Int

                @@index([
                    a,
                    b,
                ], map: "ab")
            }
        "#,
        )
        .unwrap();

        let index = schema
            .get_model("stuff_model")
            .and_then(|m| m.get_attribute("index"))
            .unwrap();
        assert_eq!(index.first_arg().and_then(|v| v.as_array()).map(|a| a.len()), Some(2));
    }

    // ==================== Enum Parsing ====================

    #[test]
    fn test_parse_enum() {
        let schema = parse_schema(
            r#"
            enum FRUIT {
                APPLE
                ORANGE @map("orange")
                PEAR

                @@map("fruits")
            }
        "#,
        )
        .unwrap();

        let fruit = schema.get_enum("FRUIT").unwrap();
        assert_eq!(fruit.values().count(), 3);
        assert_eq!(fruit.get_value("ORANGE").unwrap().attributes.len(), 1);
        assert_eq!(fruit.members.len(), 4);
    }

    // ==================== Config Parsing ====================

    #[test]
    fn test_parse_datasource() {
        let schema = parse_schema(
            r#"
            datasource db {
                provider = "postgresql"
                url      = env("DB_URL")
            }
        "#,
        )
        .unwrap();

        let block = schema.config_blocks().next().unwrap();
        assert_eq!(block.kind, ConfigKind::Datasource);
        assert_eq!(block.name.as_str(), "db");
        let url = block.get("url").and_then(|v| v.as_function()).unwrap();
        assert_eq!(url.name.as_str(), "env");
        assert_eq!(url.args[0].value.as_string(), Some("DB_URL"));
    }

    #[test]
    fn test_parse_url_is_not_a_comment() {
        let schema = parse_schema(
            r#"
            datasource db {
                provider = "postgresql"
                url      = "postgresql://localhost:5432/app" // local
            }
        "#,
        )
        .unwrap();

        let block = schema.config_blocks().next().unwrap();
        assert_eq!(
            block.get("url").and_then(|v| v.as_string()),
            Some("postgresql://localhost:5432/app")
        );
        let url = block.properties().nth(1).unwrap();
        assert_eq!(url.comment.as_ref().map(|c| c.text.as_str()), Some("local"));
    }

    // ==================== Comment Parsing ====================

    #[test]
    fn test_parse_comments() {
        let schema = parse_schema(
            r#"
            // leading
            /// documented
            model stuff_model {
                id Int @id // trailing
                // standalone
                more Int
            }
            // closing
        "#,
        )
        .unwrap();

        assert_eq!(schema.shape(), vec!["comment", "model", "comment"]);
        match &schema.declarations[0] {
            Declaration::Comments(block) => {
                assert_eq!(block.comments.len(), 2);
                assert_eq!(block.comments[0].kind, CommentKind::Line);
                assert_eq!(block.comments[1].kind, CommentKind::Doc);
                assert_eq!(block.comments[1].text, "documented");
            }
            other => panic!("Expected comments, got {:?}", other),
        }

        let model = schema.get_model("stuff_model").unwrap();
        assert_eq!(
            model.get_field("id").and_then(|f| f.comment.as_ref()).map(|c| c.text.as_str()),
            Some("trailing")
        );
        assert!(matches!(model.members[1], ModelMember::Comment(_)));
    }

    // ==================== Locations ====================

    #[test]
    fn test_spans_carry_lines() {
        let schema = parse_schema("model a {\n  id Int\n}\n\nmodel b {\n  id Int\n}\n").unwrap();
        let lines: Vec<_> = schema.models().map(|m| m.name.span.line).collect();
        assert_eq!(lines, vec![1, 5]);
        let id = schema.get_model("b").and_then(|m| m.get_field("id")).unwrap();
        assert_eq!(id.span.line, 6);
    }

    // ==================== Error Handling ====================

    #[test]
    fn test_parse_invalid_syntax() {
        let err = parse_schema("model { broken }").unwrap_err();
        assert!(matches!(err, SchemaError::SyntaxError { .. }));
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_parse_error_line() {
        let err = parse_schema("model a {\n  id Int\n  ???\n}\n").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_parse_empty_schema() {
        let schema = parse_schema("").unwrap();
        assert!(schema.declarations.is_empty());

        let schema = parse_schema("   \n\t   \n   ").unwrap();
        assert!(schema.declarations.is_empty());
    }
}
