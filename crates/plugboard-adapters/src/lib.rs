//! Infrastructure adapters for Plugboard.
//!
//! This crate implements the ports defined in `plugboard-core::application::ports`.
//! It contains the built-in plugin set and all file I/O.

pub mod builtin_plugins;
pub mod extractors;
pub mod manifest;
pub mod memory;

// Re-export commonly used adapters
pub use builtin_plugins::BuiltinCatalog;
pub use manifest::ManifestCatalog;
pub use memory::MemoryCatalog;
