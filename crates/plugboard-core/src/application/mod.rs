//! Application layer for Plugboard.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RegistryService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! registry rules itself. All of those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    DispatchedEvent,
    PluginInfo, // DTOs for display
    RegistrationInfo,
    RegistryService,
    RegistrySnapshot,
};

// Re-export port traits (for adapter implementation)
pub use ports::PluginCatalog;

pub use error::ApplicationError;
