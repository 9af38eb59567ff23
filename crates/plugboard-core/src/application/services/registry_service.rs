//! Registry Service - main application orchestrator.
//!
//! This service owns the plugin registry behind a lock and coordinates:
//! 1. Bootstrapping from plugin catalogs
//! 2. Individual injections
//! 3. Dispatch-time lookups and extraction
//!
//! Injections take the write lock, so they are serialized. Lookups take the
//! read lock and may run concurrently once startup is done.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::PluginCatalog},
    domain::{
        NativeEvent, Plugin, PluginName, PluginOrdering, PluginRegistry, Registration,
        RegistryPhase, SyntheticEvent,
    },
    error::{PlugboardError, PlugboardResult},
};

/// Display row for one plugin in its slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub position: usize,
    pub event_types: usize,
    pub description: Option<String>,
}

/// Display row for one published registration name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationInfo {
    pub registration_name: String,
    pub plugin: String,
    pub event_type: String,
    pub phase: Option<String>,
}

/// Point-in-time view of the registry for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub phase: String,
    pub ordering: Vec<String>,
    pub plugins: Vec<PluginInfo>,
    pub registrations: Vec<RegistrationInfo>,
    /// Injected plugins not yet published (no ordering yet).
    pub pending: Vec<String>,
}

/// A synthetic event together with the slot that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchedEvent {
    pub plugin: Option<String>,
    pub event: SyntheticEvent,
}

/// Main registry service.
#[derive(Debug, Default)]
pub struct RegistryService {
    registry: RwLock<PluginRegistry>,
}

impl RegistryService {
    /// Create a service around an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the registry from catalogs.
    ///
    /// Every catalog's plugins are injected first, in catalog order, then
    /// every supplied ordering. A second ordering fails with
    /// `DuplicateOrdering`. Each injection is atomic, but a failed bootstrap
    /// keeps whatever earlier injections committed.
    #[instrument(skip_all, fields(catalogs = catalogs.len()))]
    pub fn bootstrap(&self, catalogs: &[Box<dyn PluginCatalog>]) -> PlugboardResult<()> {
        for catalog in catalogs {
            let plugins = catalog.plugins()?;
            debug!(catalog = %catalog.name(), count = plugins.len(), "injecting catalog plugins");
            self.inject_plugins_by_name(plugins)?;
        }

        for catalog in catalogs {
            if let Some(ordering) = catalog.ordering()? {
                debug!(catalog = %catalog.name(), %ordering, "injecting catalog ordering");
                self.inject_plugin_order(ordering)?;
            }
        }

        info!("Registry bootstrap completed");
        Ok(())
    }

    /// Inject the global plugin ordering.
    #[instrument(skip_all, fields(ordering = %ordering))]
    pub fn inject_plugin_order(&self, ordering: PluginOrdering) -> PlugboardResult<()> {
        let mut registry = self.write()?;
        registry.inject_plugin_order(ordering).map_err(|e| {
            warn!(error = %e, "ordering rejected");
            PlugboardError::Domain(e)
        })?;
        info!(
            published = registry.ordered_slots().len(),
            registration_names = registry.registration_names().len(),
            "Plugin ordering injected"
        );
        Ok(())
    }

    /// Inject plugins keyed by slot name.
    #[instrument(skip_all, fields(count = plugins.len()))]
    pub fn inject_plugins_by_name(
        &self,
        plugins: Vec<(PluginName, Arc<Plugin>)>,
    ) -> PlugboardResult<()> {
        let names: Vec<String> = plugins.iter().map(|(n, _)| n.to_string()).collect();
        let mut registry = self.write()?;
        registry.inject_plugins_by_name(plugins).map_err(|e| {
            warn!(error = %e, "plugin injection rejected");
            PlugboardError::Domain(e)
        })?;
        info!(plugins = ?names, phase = %registry.phase(), "Plugins injected");
        Ok(())
    }

    /// Resolve the plugin owning an event's dispatch config.
    pub fn plugin_for_event(&self, event: &SyntheticEvent) -> PlugboardResult<Option<Arc<Plugin>>> {
        Ok(self.read()?.plugin_for_event(event))
    }

    pub fn plugin_for_registration_name(&self, name: &str) -> PlugboardResult<Option<Arc<Plugin>>> {
        Ok(self.read()?.plugin_for_registration_name(name))
    }

    /// Resolve a registration name to the slot name of its owner.
    pub fn owner_of(&self, registration_name: &str) -> PlugboardResult<Option<PluginName>> {
        let registry = self.read()?;
        Ok(registry
            .plugin_for_registration_name(registration_name)
            .and_then(|plugin| registry.plugin_name_of(&plugin).cloned()))
    }

    /// Run every ordered plugin's extractor and label each event with the
    /// plugin that owns its dispatch config.
    pub fn extract_events(&self, native: &NativeEvent) -> PlugboardResult<Vec<DispatchedEvent>> {
        let registry = self.read()?;
        let events = registry.extract_events(native);
        debug!(top_level_type = %native.top_level_type, count = events.len(), "events extracted");

        Ok(events
            .into_iter()
            .map(|event| {
                let plugin = registry
                    .plugin_for_event(&event)
                    .and_then(|p| registry.plugin_name_of(&p).map(ToString::to_string));
                DispatchedEvent { plugin, event }
            })
            .collect())
    }

    /// Build a display snapshot.
    pub fn snapshot(&self) -> PlugboardResult<RegistrySnapshot> {
        let registry = self.read()?;

        let ordering = registry
            .ordering()
            .map(|o| o.iter().map(ToString::to_string).collect())
            .unwrap_or_default();

        let mut plugins = Vec::new();
        let mut registrations = Vec::new();
        for (position, slot) in registry.ordered_slots().iter().enumerate() {
            plugins.push(PluginInfo {
                name: slot.name.to_string(),
                position,
                event_types: slot.plugin.event_types().len(),
                description: slot.plugin.description().map(str::to_string),
            });

            for event_type in slot.plugin.event_types() {
                match event_type.dispatch_config.registration() {
                    Some(Registration::Single(name)) => registrations.push(RegistrationInfo {
                        registration_name: name.to_string(),
                        plugin: slot.name.to_string(),
                        event_type: event_type.name.clone(),
                        phase: None,
                    }),
                    Some(Registration::Phased(phases)) => {
                        for (phase, name) in phases {
                            registrations.push(RegistrationInfo {
                                registration_name: name.to_string(),
                                plugin: slot.name.to_string(),
                                event_type: event_type.name.clone(),
                                phase: Some(phase.to_string()),
                            });
                        }
                    }
                    None => {}
                }
            }
        }

        let pending = registry
            .injected_names()
            .filter(|name| !registry.ordered_slots().iter().any(|s| &s.name == *name))
            .map(ToString::to_string)
            .collect();

        Ok(RegistrySnapshot {
            phase: registry.phase().to_string(),
            ordering,
            plugins,
            registrations,
            pending,
        })
    }

    pub fn phase(&self) -> PlugboardResult<RegistryPhase> {
        Ok(self.read()?.phase())
    }

    /// Return the registry to a fresh, unordered state.
    pub fn reset(&self) -> PlugboardResult<()> {
        self.write()?.reset();
        info!("Registry reset");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn read(&self) -> PlugboardResult<RwLockReadGuard<'_, PluginRegistry>> {
        self.registry
            .read()
            .map_err(|_| ApplicationError::RegistryLockPoisoned.into())
    }

    fn write(&self) -> PlugboardResult<RwLockWriteGuard<'_, PluginRegistry>> {
        self.registry
            .write()
            .map_err(|_| ApplicationError::RegistryLockPoisoned.into())
    }
}
