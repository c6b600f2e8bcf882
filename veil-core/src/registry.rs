//! The naming registry: original names to synthetic names, per scope.
//!
//! A registry is created empty for one run. The declaration pass is the only
//! writer; the reference pass only resolves. Entries are write-once, and all
//! counters start at zero, so the same document always yields the same names.

use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;
use tracing::debug;

use crate::error::{ObfuscateError, ObfuscateResult};
use crate::options::EnumValueNumbering;

/// Names registered under one model or enum, with that scope's counter.
#[derive(Debug, Clone, Default)]
struct Scope {
    names: IndexMap<SmolStr, SmolStr>,
    next: usize,
}

impl Scope {
    fn allocate(&mut self) -> usize {
        let index = self.next;
        self.next += 1;
        index
    }

    fn get(&self, original: &str) -> Option<&SmolStr> {
        self.names.get(original)
    }
}

/// Mapping tables from original identifiers to synthetic identifiers.
#[derive(Debug, Clone, Default)]
pub struct NamingRegistry {
    numbering: EnumValueNumbering,
    models: IndexMap<SmolStr, SmolStr>,
    fields: IndexMap<SmolStr, Scope>,
    enums: IndexMap<SmolStr, SmolStr>,
    enum_values: IndexMap<SmolStr, Scope>,
    relations: IndexMap<SmolStr, Scope>,
    env_vars: usize,
    global_values: usize,
}

impl NamingRegistry {
    /// Create an empty registry.
    pub fn new(numbering: EnumValueNumbering) -> Self {
        Self {
            numbering,
            ..Self::default()
        }
    }

    /// The enum value numbering scheme in use.
    pub fn numbering(&self) -> EnumValueNumbering {
        self.numbering
    }

    /// Register a model and create its empty field table.
    pub fn register_model(&mut self, original: &str) -> ObfuscateResult<SmolStr> {
        self.check_type_name("model", original)?;

        let synthetic = SmolStr::new(format!("model_name_{}", self.models.len()));
        self.models.insert(original.into(), synthetic.clone());
        self.fields.insert(synthetic.clone(), Scope::default());

        debug!(original, synthetic = %synthetic, "Registered model");
        Ok(synthetic)
    }

    /// Register a field under an already registered model.
    pub fn register_field(&mut self, model: &str, original: &str) -> ObfuscateResult<SmolStr> {
        let scope = self
            .fields
            .get_mut(model)
            .ok_or_else(|| unresolved("model", model, None))?;

        if scope.names.contains_key(original) {
            return Err(duplicate("field", original, Some(model)));
        }

        let synthetic = SmolStr::new(format!("field_{}", scope.allocate()));
        scope.names.insert(original.into(), synthetic.clone());

        debug!(model, original, synthetic = %synthetic, "Registered field");
        Ok(synthetic)
    }

    /// Resolve a field, registering it first when it is unknown.
    ///
    /// Used for composite-key shorthand names, which may name no declared field.
    pub fn ensure_field(&mut self, model: &str, original: &str) -> ObfuscateResult<SmolStr> {
        match self.resolve_field(model, original) {
            Ok(synthetic) => Ok(synthetic),
            Err(_) => self.register_field(model, original),
        }
    }

    /// Register an enum and create its empty value table.
    pub fn register_enum(&mut self, original: &str) -> ObfuscateResult<SmolStr> {
        self.check_type_name("enum", original)?;

        let synthetic = SmolStr::new(format!("ENUM_{}", self.enums.len()));
        self.enums.insert(original.into(), synthetic.clone());
        self.enum_values.insert(synthetic.clone(), Scope::default());

        debug!(original, synthetic = %synthetic, "Registered enum");
        Ok(synthetic)
    }

    /// Register a value under an already registered enum.
    pub fn register_enum_value(
        &mut self,
        enum_name: &str,
        original: &str,
    ) -> ObfuscateResult<SmolStr> {
        let scope = self
            .enum_values
            .get_mut(enum_name)
            .ok_or_else(|| unresolved("enum", enum_name, None))?;

        if scope.names.contains_key(original) {
            return Err(duplicate("enum value", original, Some(enum_name)));
        }

        let index = match self.numbering {
            EnumValueNumbering::PerEnum => scope.allocate(),
            EnumValueNumbering::Global => {
                let index = self.global_values;
                self.global_values += 1;
                index
            }
        };
        let synthetic = SmolStr::new(format!("VALUE_{}", index));
        scope.names.insert(original.into(), synthetic.clone());

        debug!(enum_name, original, synthetic = %synthetic, "Registered enum value");
        Ok(synthetic)
    }

    /// Allocate the next environment variable name.
    pub fn register_env_var(&mut self) -> SmolStr {
        let synthetic = SmolStr::new(format!("ENV_{}", self.env_vars));
        self.env_vars += 1;
        synthetic
    }

    /// Register the declaring side of a named relation.
    pub fn register_relation_name(
        &mut self,
        model: &str,
        original: &str,
    ) -> ObfuscateResult<SmolStr> {
        if !self.fields.contains_key(model) {
            return Err(unresolved("model", model, None));
        }

        let scope = self.relations.entry(model.into()).or_default();
        if scope.names.contains_key(original) {
            return Err(duplicate("relation", original, Some(model)));
        }

        let synthetic = SmolStr::new(format!("{}_relation_{}", model, scope.allocate()));
        scope.names.insert(original.into(), synthetic.clone());

        debug!(model, original, synthetic = %synthetic, "Registered relation name");
        Ok(synthetic)
    }

    /// Resolve a type reference to a model or an enum.
    pub fn resolve_model_or_enum(&self, original: &str) -> ObfuscateResult<SmolStr> {
        self.models
            .get(original)
            .or_else(|| self.enums.get(original))
            .cloned()
            .ok_or_else(|| unresolved("model or enum", original, None))
    }

    /// Resolve a field of a model, both given by their synthetic model name.
    pub fn resolve_field(&self, model: &str, original: &str) -> ObfuscateResult<SmolStr> {
        self.fields
            .get(model)
            .and_then(|scope| scope.get(original))
            .cloned()
            .ok_or_else(|| unresolved("field", original, Some(model)))
    }

    /// Resolve a value of an enum, given by its synthetic enum name.
    pub fn resolve_enum_value(&self, enum_name: &str, original: &str) -> ObfuscateResult<SmolStr> {
        self.enum_values
            .get(enum_name)
            .and_then(|scope| scope.get(original))
            .cloned()
            .ok_or_else(|| unresolved("enum value", original, Some(enum_name)))
    }

    /// Resolve a relation name declared by the given (synthetic) model.
    pub fn resolve_relation_name(&self, model: &str, original: &str) -> ObfuscateResult<SmolStr> {
        self.relations
            .get(model)
            .and_then(|scope| scope.get(original))
            .cloned()
            .ok_or_else(|| unresolved("relation", original, Some(model)))
    }

    /// Check whether a synthetic name belongs to an enum.
    pub fn is_enum(&self, synthetic: &str) -> bool {
        self.enum_values.contains_key(synthetic)
    }

    /// Check whether a synthetic name belongs to a model.
    pub fn is_model(&self, synthetic: &str) -> bool {
        self.fields.contains_key(synthetic)
    }

    /// Number of registered models.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Number of registered enums.
    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Number of environment variable names handed out.
    pub fn env_var_count(&self) -> usize {
        self.env_vars
    }

    /// A snapshot of every table, keyed the same way as the registry.
    pub fn mapping(&self) -> RegistryMapping {
        fn tables(scopes: &IndexMap<SmolStr, Scope>) -> IndexMap<String, IndexMap<String, String>> {
            scopes
                .iter()
                .map(|(owner, scope)| {
                    let names = scope
                        .names
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect();
                    (owner.to_string(), names)
                })
                .collect()
        }

        fn table(names: &IndexMap<SmolStr, SmolStr>) -> IndexMap<String, String> {
            names
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }

        RegistryMapping {
            models: table(&self.models),
            fields: tables(&self.fields),
            enums: table(&self.enums),
            enum_values: tables(&self.enum_values),
            relations: tables(&self.relations),
        }
    }

    /// Model and enum names share one namespace.
    fn check_type_name(&self, kind: &'static str, original: &str) -> ObfuscateResult<()> {
        if self.models.contains_key(original) || self.enums.contains_key(original) {
            return Err(duplicate(kind, original, None));
        }
        Ok(())
    }
}

/// Serializable view of a [`NamingRegistry`].
///
/// Scoped tables are keyed by the synthetic name of their model or enum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryMapping {
    /// Original model name to synthetic name.
    pub models: IndexMap<String, String>,
    /// Per model, original field name to synthetic name.
    pub fields: IndexMap<String, IndexMap<String, String>>,
    /// Original enum name to synthetic name.
    pub enums: IndexMap<String, String>,
    /// Per enum, original value name to synthetic name.
    pub enum_values: IndexMap<String, IndexMap<String, String>>,
    /// Per declaring model, original relation name to synthetic name.
    pub relations: IndexMap<String, IndexMap<String, String>>,
}

fn duplicate(kind: &'static str, name: &str, scope: Option<&str>) -> ObfuscateError {
    ObfuscateError::DuplicateDeclaration {
        kind,
        name: name.to_string(),
        scope: scope.map(str::to_string),
        line: None,
    }
}

fn unresolved(kind: &'static str, name: &str, scope: Option<&str>) -> ObfuscateError {
    ObfuscateError::UnresolvedReference {
        kind,
        name: name.to_string(),
        scope: scope.map(str::to_string),
        line: None,
    }
}
