//! Event plugins and their extraction capability.
//!
//! A [`Plugin`] is a capability set: an optional [`EventExtractor`] plus the
//! event types it publishes. Plugins are built once and shared as
//! `Arc<Plugin>`; the registry compares them by [`PluginId`], so two plugins
//! built from identical parts are still different plugins.

use std::fmt;
use std::sync::Arc;

use super::{DispatchConfig, NativeEvent, SyntheticEvent};
use crate::domain::value_objects::PluginId;

/// The event-extraction capability every injected plugin must expose.
pub trait EventExtractor: Send + Sync {
    /// Turn a native event into zero or more synthetic events.
    ///
    /// `event_types` are the owning plugin's published event types, so one
    /// extractor implementation can serve many plugins.
    fn extract(&self, event_types: &[EventType], native: &NativeEvent) -> Vec<SyntheticEvent>;
}

impl<F> EventExtractor for F
where
    F: Fn(&[EventType], &NativeEvent) -> Vec<SyntheticEvent> + Send + Sync,
{
    fn extract(&self, event_types: &[EventType], native: &NativeEvent) -> Vec<SyntheticEvent> {
        self(event_types, native)
    }
}

/// One published event type: a name and its dispatch config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventType {
    pub name: String,
    pub dispatch_config: DispatchConfig,
}

impl EventType {
    pub fn new(name: impl Into<String>, dispatch_config: DispatchConfig) -> Self {
        Self {
            name: name.into(),
            dispatch_config,
        }
    }
}

/// An event plugin.
pub struct Plugin {
    id: PluginId,
    extractor: Option<Arc<dyn EventExtractor>>,
    event_types: Vec<EventType>,
    description: Option<String>,
}

impl Plugin {
    pub fn builder() -> PluginBuilder {
        PluginBuilder::default()
    }

    pub fn id(&self) -> PluginId {
        self.id
    }

    /// Whether this plugin can extract events at all.
    pub fn has_extractor(&self) -> bool {
        self.extractor.is_some()
    }

    pub fn event_types(&self) -> &[EventType] {
        &self.event_types
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Run the extractor. A plugin without one extracts nothing.
    pub fn extract_events(&self, native: &NativeEvent) -> Vec<SyntheticEvent> {
        self.extractor
            .as_ref()
            .map(|x| x.extract(&self.event_types, native))
            .unwrap_or_default()
    }

    /// Identity comparison.
    pub fn same_as(&self, other: &Plugin) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("id", &self.id)
            .field("extractor", &self.extractor.is_some())
            .field("event_types", &self.event_types)
            .field("description", &self.description)
            .finish()
    }
}

/// Builder for [`Plugin`]. Every `build` call mints a fresh identity.
#[derive(Default)]
pub struct PluginBuilder {
    extractor: Option<Arc<dyn EventExtractor>>,
    event_types: Vec<EventType>,
    description: Option<String>,
}

impl PluginBuilder {
    pub fn extractor(mut self, extractor: impl EventExtractor + 'static) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    pub fn shared_extractor(mut self, extractor: Arc<dyn EventExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Append an event type. Publication follows insertion order.
    pub fn event_type(mut self, name: impl Into<String>, config: DispatchConfig) -> Self {
        self.event_types.push(EventType::new(name, config));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> Arc<Plugin> {
        Arc::new(Plugin {
            id: PluginId::generate(),
            extractor: self.extractor,
            event_types: self.event_types,
            description: self.description,
        })
    }
}
