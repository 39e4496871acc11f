//! Context Registry

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use metron_units::UnitRegistry;
use tracing::debug;

use crate::{Context, ContextError};

/// Named contexts, looked up by name
#[derive(Default)]
pub struct ContextRegistry {
    contexts: RwLock<HashMap<String, Arc<Context>>>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a context and register it under its name.
    ///
    /// An empty name creates the context without registering it; the caller
    /// keeps the only reference.
    pub fn define(
        &self,
        name: &str,
        unit: &str,
        template: &str,
        units: &UnitRegistry,
    ) -> Result<Arc<Context>, ContextError> {
        if name.is_empty() {
            return Ok(Arc::new(Context::new(name, unit, template, units)?));
        }
        if self.contains(name) {
            return Err(ContextError::DuplicateContext(name.to_string()));
        }

        let context = Arc::new(Context::new(name, unit, template, units)?);
        let mut contexts = self.contexts.write().unwrap_or_else(PoisonError::into_inner);
        match contexts.entry(name.to_string()) {
            Entry::Occupied(_) => Err(ContextError::DuplicateContext(name.to_string())),
            Entry::Vacant(slot) => {
                debug!(name, unit = %context.symbol(), template = %context.template(), "defined context");
                slot.insert(Arc::clone(&context));
                Ok(context)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Context>> {
        self.contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Like `get`, failing with `UnknownContext`
    pub fn require(&self, name: &str) -> Result<Arc<Context>, ContextError> {
        self.get(name)
            .ok_or_else(|| ContextError::UnknownContext(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Unregister a context. Existing references stay usable.
    pub fn delete(&self, name: &str) -> Option<Arc<Context>> {
        let removed = self
            .contexts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        if removed.is_some() {
            debug!(name, "deleted context");
        }
        removed
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.contexts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
