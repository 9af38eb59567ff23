use serde::{Deserialize, Serialize};

use super::DispatchConfig;

/// A raw top-level event handed to the plugins for extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeEvent {
    pub top_level_type: String,
    pub target: Option<String>,
}

impl NativeEvent {
    pub fn new(top_level_type: impl Into<String>) -> Self {
        Self {
            top_level_type: top_level_type.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// An event produced by a plugin's extractor.
///
/// Carries the dispatch config it was extracted for, which is what
/// `PluginRegistry::plugin_for_event` resolves against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticEvent {
    pub event_type: String,
    pub dispatch_config: DispatchConfig,
    pub target: Option<String>,
}

impl SyntheticEvent {
    pub fn new(event_type: impl Into<String>, dispatch_config: DispatchConfig) -> Self {
        Self {
            event_type: event_type.into(),
            dispatch_config,
            target: None,
        }
    }

    pub fn dispatch_config(&self) -> &DispatchConfig {
        &self.dispatch_config
    }
}
