//! In-memory plugin catalog.

use std::sync::Arc;

use plugboard_core::{
    application::ports::PluginCatalog,
    domain::{Plugin, PluginName, PluginOrdering},
    error::PlugboardResult,
};

/// A catalog assembled in code, for embedding and tests.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    name: String,
    ordering: Option<PluginOrdering>,
    plugins: Vec<(PluginName, Arc<Plugin>)>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordering: None,
            plugins: Vec::new(),
        }
    }

    pub fn with_ordering(mut self, ordering: PluginOrdering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Add a plugin. Catalog order is preserved.
    pub fn with_plugin(mut self, name: impl Into<PluginName>, plugin: Arc<Plugin>) -> Self {
        self.plugins.push((name.into(), plugin));
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl PluginCatalog for MemoryCatalog {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn ordering(&self) -> PlugboardResult<Option<PluginOrdering>> {
        Ok(self.ordering.clone())
    }

    fn plugins(&self) -> PlugboardResult<Vec<(PluginName, Arc<Plugin>)>> {
        Ok(self.plugins.clone())
    }
}
