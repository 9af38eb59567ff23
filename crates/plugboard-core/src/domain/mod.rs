//! Core domain layer for Plugboard.
//!
//! This module contains the registry logic with no I/O. Plugin sources,
//! manifests and locking are handled via ports and services in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Identity over structure**: plugins compare by `PluginId`
//! - **All-or-nothing mutation**: the registry never exposes half-built tables
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod registry;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    DispatchConfig, EventExtractor, EventType, NativeEvent, Plugin, PluginBuilder, PluginOrdering,
    Registration, SyntheticEvent,
};

pub use error::{DomainError, ErrorCategory};

pub use registry::{PluginRegistry, PluginSlot, RegistryPhase};

pub use value_objects::{Phase, PluginId, PluginName, RegistrationName};

pub use validation::DomainValidator;
