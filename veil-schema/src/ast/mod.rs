//! Abstract Syntax Tree (AST) types for Prisma schemas.
//!
//! The tree keeps declarations, members and comments in source order so a
//! rewritten schema can be rendered back with the same shape.

mod attribute;
mod config;
mod field;
mod model;
mod schema;
mod types;

pub use attribute::*;
pub use config::*;
pub use field::*;
pub use model::*;
pub use schema::*;
pub use types::*;
