//! Domain value objects: PluginName, RegistrationName, PluginId, Phase.
//!
//! # Design
//!
//! These are pure value types with equality-by-value. `PluginId` is the one
//! exception in spirit: it is the identity token a plugin carries, so two
//! plugins with identical contents still compare unequal by id.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ── PluginName ───────────────────────────────────────────────────────────────

/// Name of a plugin slot in the ordering (e.g. `"simple"`, `"enter-leave"`).
///
/// Invariant: never empty. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginName(String);

impl PluginName {
    /// Create a plugin name.
    ///
    /// # Panics
    /// Panics if `name` is empty or blank (use `try_new` for fallible).
    pub fn new(name: impl Into<String>) -> Self {
        match Self::try_new(name) {
            Ok(name) => name,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            Err(DomainError::InvalidPluginName(
                "plugin name cannot be empty".into(),
            ))
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PluginName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

impl TryFrom<String> for PluginName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<PluginName> for String {
    fn from(name: PluginName) -> Self {
        name.0
    }
}

impl From<&str> for PluginName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for PluginName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ── RegistrationName ─────────────────────────────────────────────────────────

/// A handler slot advertised by a plugin, such as `onClick`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationName(String);

impl RegistrationName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegistrationName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for RegistrationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ── PluginId ─────────────────────────────────────────────────────────────────

/// Opaque identity assigned to a plugin when it is constructed.
///
/// "Same plugin" means "same `PluginId`", regardless of what the plugin
/// publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginId(Uuid);

impl PluginId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Traversal phase of a phased registration.
///
/// Serialized as the lowercase past tense used in manifests: `bubbled` and
/// `captured`. Ordering follows declaration, so bubble names publish first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Bubbled,
    Captured,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bubbled => "bubbled",
            Self::Captured => "captured",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
