//! # Veil
//!
//! Anonymize Prisma schemas so they can be shared without revealing a
//! project's domain vocabulary.
//!
//! Every user-chosen identifier is replaced by a synthetic, position-derived
//! name (`model_name_0`, `field_1`, `ENUM_0`, `VALUE_2`, `ENV_0`, ...) while
//! keywords, scalar types, attribute names and functions are kept, so the
//! output is still a structurally valid schema.
//!
//! ## Quick Start
//!
//! ```rust
//! let output = veil::obfuscate(r#"
//!     enum Role {
//!         USER
//!         ADMIN
//!     }
//!
//!     model User {
//!         id   Int  @id
//!         role Role @default(ADMIN)
//!     }
//! "#).unwrap();
//!
//! assert!(output.contains("field_1 ENUM_0 @default(VALUE_1)"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Schema parsing, AST types and rendering.
pub mod schema {
    pub use veil_schema::*;
}

/// The naming registry and the renaming passes.
pub mod engine {
    pub use veil_core::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{
        EnumValueNumbering, NamingRegistry, ObfuscateError, ObfuscateOptions, Obfuscation,
        Obfuscator, obfuscate,
    };
    pub use crate::schema::{Schema, parse_schema, render_schema};
}

// Re-export key types at the crate root
pub use engine::{ObfuscateError, ObfuscateOptions, Obfuscator, obfuscate};
pub use schema::{Schema, SchemaError};
