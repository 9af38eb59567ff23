//! Event extractors shared by built-in and manifest plugins.
//!
//! An extractor receives its plugin's published event types, so one instance
//! serves every plugin that names it in a manifest.

use std::sync::Arc;

use plugboard_core::domain::{EventExtractor, EventType, NativeEvent, SyntheticEvent};

/// Extractor names a manifest may use.
pub const KNOWN_EXTRACTORS: &[&str] = &["dispatch", "noop"];

/// Emits one synthetic event for every event type named exactly like the
/// native top-level type.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchExtractor;

impl EventExtractor for DispatchExtractor {
    fn extract(&self, event_types: &[EventType], native: &NativeEvent) -> Vec<SyntheticEvent> {
        event_types
            .iter()
            .filter(|t| t.name == native.top_level_type)
            .map(|t| synthesize(t, native))
            .collect()
    }
}

/// Never emits anything. Satisfies the capability requirement for plugins
/// that only reserve registration names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExtractor;

impl EventExtractor for NoopExtractor {
    fn extract(&self, _: &[EventType], _: &NativeEvent) -> Vec<SyntheticEvent> {
        Vec::new()
    }
}

/// Maps native top-level types onto event-type names.
///
/// Each trigger lists the event types it produces, in emission order. Event
/// types the owning plugin does not publish are skipped.
#[derive(Debug, Clone, Copy)]
pub struct TriggerExtractor {
    triggers: &'static [(&'static str, &'static [&'static str])],
}

impl TriggerExtractor {
    pub const fn new(triggers: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { triggers }
    }
}

impl EventExtractor for TriggerExtractor {
    fn extract(&self, event_types: &[EventType], native: &NativeEvent) -> Vec<SyntheticEvent> {
        self.triggers
            .iter()
            .filter(|(top_level, _)| *top_level == native.top_level_type)
            .flat_map(|(_, produced)| produced.iter())
            .filter_map(|name| event_types.iter().find(|t| t.name == *name))
            .map(|t| synthesize(t, native))
            .collect()
    }
}

/// Look up a manifest extractor by name.
pub fn extractor_by_name(name: &str) -> Option<Arc<dyn EventExtractor>> {
    match name {
        "dispatch" => Some(Arc::new(DispatchExtractor)),
        "noop" => Some(Arc::new(NoopExtractor)),
        _ => None,
    }
}

fn synthesize(event_type: &EventType, native: &NativeEvent) -> SyntheticEvent {
    let mut event = SyntheticEvent::new(&event_type.name, event_type.dispatch_config.clone());
    event.target = native.target.clone();
    event
}
