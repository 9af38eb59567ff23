//! Plugboard Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Plugboard, an
//! event-plugin registry that composes independently authored plugins into
//! one deterministic dispatch table.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          plugboard-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │           (RegistryService)             │
//! │   Locking, bootstrap, snapshots         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Driven: PluginCatalog)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   plugboard-adapters (Infrastructure)   │
//! │ (BuiltinCatalog, ManifestCatalog, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (PluginRegistry, Plugin, DispatchConfig)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use plugboard_core::prelude::*;
//!
//! fn noop(_: &[EventType], _: &NativeEvent) -> Vec<SyntheticEvent> {
//!     Vec::new()
//! }
//!
//! let click = Plugin::builder()
//!     .extractor(noop)
//!     .event_type("click", DispatchConfig::single("onClick"))
//!     .build();
//!
//! let mut registry = PluginRegistry::new();
//! registry.inject_plugins_by_name([(PluginName::new("simple"), click.clone())])?;
//! registry.inject_plugin_order(["simple"].into_iter().collect())?;
//!
//! let event = SyntheticEvent::new("click", DispatchConfig::single("onClick"));
//! assert!(registry.plugin_for_event(&event).unwrap().same_as(&click));
//! # Ok::<(), DomainError>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DispatchedEvent, RegistryService, RegistrySnapshot, ports::PluginCatalog,
    };
    pub use crate::domain::{
        DispatchConfig, DomainError, EventExtractor, EventType, NativeEvent, Phase, Plugin,
        PluginName, PluginOrdering, PluginRegistry, RegistrationName, RegistryPhase,
        SyntheticEvent,
    };
    pub use crate::error::{PlugboardError, PlugboardResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
