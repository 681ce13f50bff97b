use crate::model::Instance;
use resgen_core::{GeneratorError, GeneratorResult};
use std::collections::HashMap;

/// Builds a fresh instance, or explains why it could not
pub type Factory = Box<dyn Fn() -> Result<Box<dyn Instance>, String>>;

/// Explicit type-name -> factory registry, populated at startup
#[derive(Default)]
pub struct ModelRegistry {
    factories: HashMap<String, Factory>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a fully-qualified type name.
    /// Returns true when an earlier registration was replaced.
    pub fn register<F>(&mut self, type_name: &str, factory: F) -> bool
    where
        F: Fn() -> Result<Box<dyn Instance>, String> + 'static,
    {
        self.factories
            .insert(normalize(type_name).to_string(), Box::new(factory))
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Construct a zero-argument instance of the named type
    pub fn construct(&self, type_name: &str) -> GeneratorResult<Box<dyn Instance>> {
        let factory = self.factories.get(normalize(type_name)).ok_or_else(|| {
            GeneratorError::not_loadable(type_name, "class is not registered")
        })?;

        factory().map_err(|reason| GeneratorError::not_loadable(type_name, reason))
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ModelRegistry").field("types", &names).finish()
    }
}

fn normalize(type_name: &str) -> &str {
    type_name.trim_start_matches('\\')
}
