//! Pest grammar parser for Prisma schema files.

use pest_derive::Parser;

/// The Prisma schema parser.
#[derive(Parser)]
#[grammar = "parser/schema.pest"]
pub struct SchemaParser;
