//! Driven (output) ports - implemented by infrastructure.
//!
//! The `plugboard-adapters` crate provides implementations.

use std::sync::Arc;

use crate::domain::{Plugin, PluginName, PluginOrdering};
use crate::error::PlugboardResult;

/// Port for plugin sources.
///
/// Implemented by:
/// - `plugboard_adapters::BuiltinCatalog` (plugins shipped with Plugboard)
/// - `plugboard_adapters::ManifestCatalog` (TOML manifests)
/// - `plugboard_adapters::MemoryCatalog` (embedding and tests)
///
/// ## Design Notes
///
/// - A catalog must return the *same* `Arc<Plugin>` on every call, otherwise
///   a second bootstrap looks like a conflicting plugin
/// - At most one catalog in a bootstrap may supply an ordering
#[cfg_attr(test, mockall::automock)]
pub trait PluginCatalog: Send + Sync {
    /// Human-readable catalog name for logs and errors.
    fn name(&self) -> String;

    /// The plugin ordering this catalog supplies, if any.
    fn ordering(&self) -> PlugboardResult<Option<PluginOrdering>>;

    /// Plugins keyed by slot name, in catalog order.
    fn plugins(&self) -> PlugboardResult<Vec<(PluginName, Arc<Plugin>)>>;
}
