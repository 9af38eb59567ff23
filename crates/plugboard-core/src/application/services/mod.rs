//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "bootstrap the registry" or "resolve an event".

pub mod registry_service;

pub use registry_service::{
    DispatchedEvent, PluginInfo, RegistrationInfo, RegistryService, RegistrySnapshot,
};
