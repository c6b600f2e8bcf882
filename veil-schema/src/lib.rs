//! # veil-schema
//!
//! Parser, AST and renderer for Prisma schema files.
//!
//! This crate provides:
//! - A pest grammar and parser for `.prisma` documents
//! - An ordered, mutable AST that keeps comments and member order
//! - A renderer that turns the AST back into normalized schema text
//!
//! ## Example
//!
//! ```rust
//! use veil_schema::{parse_schema, render_schema};
//!
//! let schema = parse_schema(r#"
//!     model User {
//!         id    Int    @id @default(autoincrement())
//!         email String @unique
//!     }
//! "#).unwrap();
//!
//! assert_eq!(schema.models().count(), 1);
//! assert!(render_schema(&schema).starts_with("model User {"));
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod renderer;

pub use ast::*;
pub use error::{SchemaError, SchemaResult};
pub use parser::{parse_schema, parse_schema_file};
pub use renderer::render_schema;
