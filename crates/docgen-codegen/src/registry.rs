//! Example registry: one representative value per type.
//!
//! The registry is the synthesizer's cache. It starts out with the
//! hand-picked literals of [`crate::seeds`], takes configured overrides, and
//! grows as struct examples are memoized. Nothing is ever evicted.

use crate::seeds;
use crate::synthesizer::Synthesizer;
use docgen_core::{DocgenConfig, Example, Result, TypeDesc};
use docgen_introspector::TypeCatalog;
use std::collections::HashMap;

/// Mapping from type descriptor to example value.
///
/// # Examples
///
/// ```
/// use docgen_codegen::ExampleRegistry;
/// use docgen_core::{Example, TypeDesc};
/// use serde_json::json;
///
/// let registry = ExampleRegistry::with_defaults();
/// assert_eq!(
///     registry.lookup(&TypeDesc::named("ChainEpoch")),
///     Some(&Example::literal(json!(10101)))
/// );
/// assert!(registry.lookup(&TypeDesc::named("Context")).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExampleRegistry {
    examples: HashMap<TypeDesc, Example>,
}

impl ExampleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in example literals.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (ty, example) in seeds::default_examples() {
            registry.insert(ty, example);
        }
        registry
    }

    /// Builds the registry for a run: built-in literals, then the configured
    /// literals, then the built-in and configured map examples.
    ///
    /// Built-in map examples whose value type cannot be synthesized from the
    /// loaded sources are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured type expression does not parse or a
    /// configured map example cannot be synthesized.
    pub fn for_config(catalog: &TypeCatalog, config: &DocgenConfig) -> Result<Self> {
        let mut registry = Self::with_defaults();
        seeds::install_literal_examples(&mut registry, catalog, &config.examples)?;

        let mut synth = Synthesizer::new(&mut registry, catalog.structs())
            .with_list_policy(config.list_examples);
        seeds::install_map_examples(&mut synth, catalog, &seeds::default_map_examples(), false)?;
        seeds::install_map_examples(&mut synth, catalog, &config.map_examples, true)?;

        tracing::debug!(examples = registry.len(), "example registry ready");
        Ok(registry)
    }

    /// Returns the example registered for a type.
    ///
    /// Built-in literals are keyed by leaf name, so a struct the sources
    /// declare under a seeded name (`Cid`, `TipSetKey`) still answers with
    /// the literal.
    #[must_use]
    pub fn lookup(&self, ty: &TypeDesc) -> Option<&Example> {
        self.examples.get(ty).or_else(|| match ty {
            TypeDesc::Struct(name) => self.examples.get(&TypeDesc::named(name.as_str())),
            _ => None,
        })
    }

    /// Registers an example, replacing any previous one for the same type.
    pub fn insert(&mut self, ty: TypeDesc, example: Example) {
        self.examples.insert(ty, example);
    }

    /// Returns `true` if the type has an example.
    #[must_use]
    pub fn contains(&self, ty: &TypeDesc) -> bool {
        self.lookup(ty).is_some()
    }

    /// Number of registered examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}
