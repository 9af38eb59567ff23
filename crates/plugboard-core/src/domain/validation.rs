use crate::domain::{
    entities::{DispatchConfig, Plugin},
    error::DomainError,
    value_objects::PluginName,
};

/// Centralized domain validation.
///
/// Shape checks live here; cross-plugin checks (conflicts, collisions) need
/// registry state and live in `registry.rs`.
pub struct DomainValidator;

impl DomainValidator {
    /// A plugin must expose the extraction capability to be injected.
    pub fn validate_plugin(name: &PluginName, plugin: &Plugin) -> Result<(), DomainError> {
        if plugin.has_extractor() {
            Ok(())
        } else {
            Err(DomainError::MissingCapability {
                plugin: name.to_string(),
            })
        }
    }

    /// A dispatch config must carry at least one of its two shapes.
    pub fn validate_dispatch_config(
        plugin: &PluginName,
        event_type: &str,
        config: &DispatchConfig,
    ) -> Result<(), DomainError> {
        match config.registration() {
            Some(_) => Ok(()),
            None => Err(DomainError::MalformedEventType {
                event_type: event_type.to_string(),
                plugin: plugin.to_string(),
            }),
        }
    }
}
