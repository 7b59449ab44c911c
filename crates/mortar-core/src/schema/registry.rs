use super::Model;
use crate::{Error, Result};

use indexmap::IndexMap;

/// The set of models an adapter manages, keyed by model name.
///
/// A registry has a single owner. The orchestrator and the predicate compiler
/// borrow it; descriptors change only through [`Registry::model_mut`] between
/// migrations.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    models: IndexMap<String, Model>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Validates and registers a model.
    pub fn register(&mut self, model: Model) -> Result<()> {
        model.validate()?;

        if self.models.contains_key(&model.name) {
            return Err(Error::invalid_schema(&model.name, "already registered"));
        }

        self.models.insert(model.name.clone(), model);
        Ok(())
    }

    pub fn model(&self, name: &str) -> Result<&Model> {
        self.models
            .get(name)
            .ok_or_else(|| Error::unknown_model(name))
    }

    pub fn model_mut(&mut self, name: &str) -> Result<&mut Model> {
        self.models
            .get_mut(name)
            .ok_or_else(|| Error::unknown_model(name))
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &Model> + '_ {
        self.models.values()
    }

    pub fn model_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.models.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
