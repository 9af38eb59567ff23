//! Application layer errors.
//!
//! These errors represent failures in orchestration, not registry rules.
//! Registry rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A writer panicked while holding the registry lock.
    #[error("Plugin registry lock poisoned")]
    RegistryLockPoisoned,

    /// A plugin catalog could not produce its plugins or ordering.
    #[error("Plugin catalog '{catalog}' unavailable: {reason}")]
    CatalogUnavailable { catalog: String, reason: String },

    /// A plugin manifest could not be read or parsed.
    #[error("Invalid plugin manifest {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    /// A manifest asked for an extractor nobody provides.
    #[error("Plugin '{plugin}' requests unknown extractor '{extractor}'")]
    UnknownExtractor { plugin: String, extractor: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RegistryLockPoisoned => vec![
                "A previous registry update panicked".into(),
                "Restart the process; the registry cannot be trusted".into(),
            ],
            Self::CatalogUnavailable { catalog, .. } => vec![
                format!("Catalog '{}' failed to load", catalog),
                "Check the catalog's source and try again".into(),
            ],
            Self::ManifestInvalid { path, .. } => vec![
                format!("Failed to load: {}", path.display()),
                "Check that the file exists and is valid TOML".into(),
                "Try: plugboard check <MANIFEST> for a focused report".into(),
            ],
            Self::UnknownExtractor { extractor, .. } => vec![
                format!("'{}' is not a known extractor", extractor),
                "Known extractors: dispatch, noop".into(),
                "Omit `extractor` only if the plugin is meant to be rejected".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RegistryLockPoisoned => ErrorCategory::Internal,
            Self::CatalogUnavailable { .. } => ErrorCategory::NotFound,
            Self::ManifestInvalid { .. } | Self::UnknownExtractor { .. } => {
                ErrorCategory::Configuration
            }
        }
    }
}
