// ============================================================================
// domain/error.rs - REGISTRY WIRING ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is a fatal wiring mistake raised synchronously by the
/// injection call that caused it. None of them are transient.
///
/// All errors are:
/// - Cloneable (so tests and callers can keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("event plugins must implement an extraction capability, but `{plugin}` does not")]
    MissingCapability { plugin: String },

    #[error("invalid plugin name: {0}")]
    InvalidPluginName(String),

    #[error("failed to publish event `{event_type}` for plugin `{plugin}`")]
    MalformedEventType { event_type: String, plugin: String },

    // ========================================================================
    // Configuration Conflicts
    // ========================================================================
    #[error("cannot inject event plugins that do not exist in the plugin ordering, `{plugin}`")]
    UnknownPluginName { plugin: String },

    #[error("cannot inject event plugin ordering more than once")]
    DuplicateOrdering,

    #[error("cannot inject two different event plugins using the same name, `{plugin}`")]
    ConflictingPlugin { plugin: String },

    #[error("more than one plugin attempted to publish the same registration name, `{registration_name}`")]
    DuplicateRegistrationName { registration_name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingCapability { plugin } => vec![
                format!("Plugin '{}' has no extractor", plugin),
                "Give the plugin an extractor (e.g. extractor = \"dispatch\" in a manifest)".into(),
            ],
            Self::UnknownPluginName { plugin } => vec![
                format!("'{}' has no slot in the plugin ordering", plugin),
                "Add the name to the `order` list, or rename the plugin".into(),
                "Try: plugboard inspect to see the active ordering".into(),
            ],
            Self::DuplicateOrdering => vec![
                "Only one catalog may supply a plugin ordering".into(),
                "Remove `order` from all but one manifest, or pass --no-builtins".into(),
            ],
            Self::ConflictingPlugin { plugin } => vec![
                format!("Two catalogs define a plugin named '{}'", plugin),
                "Rename one of the plugins".into(),
            ],
            Self::MalformedEventType { event_type, .. } => vec![
                format!("Event type '{}' has no dispatch configuration", event_type),
                "Set either `registration_name` or `phased_registration_names`".into(),
            ],
            Self::DuplicateRegistrationName { registration_name } => vec![
                format!("'{}' is published by more than one plugin", registration_name),
                "Registration names must be unique across all plugins, including phases".into(),
                format!("Try: plugboard resolve {}", registration_name),
            ],
            Self::InvalidPluginName(_) => vec!["Plugin names must be non-empty".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingCapability { .. }
            | Self::InvalidPluginName(_)
            | Self::MalformedEventType { .. } => ErrorCategory::Validation,
            Self::UnknownPluginName { .. }
            | Self::DuplicateOrdering
            | Self::ConflictingPlugin { .. }
            | Self::DuplicateRegistrationName { .. } => ErrorCategory::Conflict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
}
