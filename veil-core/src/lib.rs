//! # veil-core
//!
//! The two-pass engine that anonymizes a Prisma schema.
//!
//! Every user-chosen identifier (models, fields, enums, enum values, relation
//! names, `env()` variables, index and unique constraint names) is replaced by a
//! deterministic synthetic name while the document keeps its shape:
//!
//! 1. the declaration pass renames every declaration and records it in a
//!    [`NamingRegistry`],
//! 2. the reference pass rewrites every reference using that registry.
//!
//! Any inconsistency aborts the run; a partially renamed schema is never
//! returned.
//!
//! ## Example
//!
//! ```rust
//! use veil_core::obfuscate;
//!
//! let output = obfuscate(r#"
//!     model stuff_model {
//!         id   Int  @id @default(autoincrement())
//!         prop Int?
//!     }
//! "#).unwrap();
//!
//! assert_eq!(
//!     output,
//!     "model model_name_0 {\n  field_0 Int @id @default(autoincrement())\n  field_1 Int?\n}\n"
//! );
//! ```

mod declarations;
pub mod error;
pub mod options;
mod references;
pub mod registry;

use tracing::{debug, info};
use veil_schema::{Schema, parse_schema, render_schema};

pub use error::{ObfuscateError, ObfuscateResult};
pub use options::{EnumValueNumbering, ObfuscateOptions};
pub use registry::{NamingRegistry, RegistryMapping};

/// Obfuscate schema text with the default options.
pub fn obfuscate(text: &str) -> ObfuscateResult<String> {
    Obfuscator::default().run(text).map(|result| result.output)
}

/// Runs the parse, rename, rewrite and render steps.
#[derive(Debug, Clone, Default)]
pub struct Obfuscator {
    options: ObfuscateOptions,
}

impl Obfuscator {
    /// Create an obfuscator with the given options.
    pub fn new(options: ObfuscateOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ObfuscateOptions {
        &self.options
    }

    /// Obfuscate schema text.
    pub fn run(&self, text: &str) -> ObfuscateResult<Obfuscation> {
        let mut schema = parse_schema(text)?;
        debug!(%schema, "Parsed schema");

        let registry = obfuscate_schema(&mut schema, &self.options)?;

        Ok(Obfuscation {
            output: render_schema(&schema),
            registry,
        })
    }
}

/// The result of a successful run.
#[derive(Debug, Clone)]
pub struct Obfuscation {
    /// The rendered, obfuscated schema.
    pub output: String,
    /// The names handed out during the run.
    pub registry: NamingRegistry,
}

/// Obfuscate a parsed schema in place.
///
/// On error the schema may be partially renamed and must be discarded.
pub fn obfuscate_schema(
    schema: &mut Schema,
    options: &ObfuscateOptions,
) -> ObfuscateResult<NamingRegistry> {
    let mut registry = NamingRegistry::new(options.enum_values);

    let result = declarations::rename_declarations(schema, &mut registry)
        .and_then(|()| references::rewrite_references(schema, &registry));

    if let Err(err) = result {
        dump_registry(&registry);
        return Err(err);
    }

    info!(
        models = registry.model_count(),
        enums = registry.enum_count(),
        env_vars = registry.env_var_count(),
        numbering = %registry.numbering(),
        "Obfuscated schema"
    );
    Ok(registry)
}

fn dump_registry(registry: &NamingRegistry) {
    match serde_json::to_string_pretty(&registry.mapping()) {
        Ok(mapping) => debug!(%mapping, "Naming registry at failure"),
        Err(err) => debug!(error = %err, "Failed to serialize naming registry"),
    }
}
