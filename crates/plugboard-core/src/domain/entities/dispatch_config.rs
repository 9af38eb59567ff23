//! Dispatch configuration attached to every event type a plugin publishes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Phase, RegistrationName};

/// A dispatch config as authored.
///
/// Both members are optional because configs arrive from manifests and
/// hand-built plugins alike; [`DispatchConfig::registration`] classifies the
/// shape, and a config with neither member is rejected when the owning plugin
/// is published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_name: Option<RegistrationName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phased_registration_names: Option<BTreeMap<Phase, RegistrationName>>,
}

/// Classified view of a [`DispatchConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration<'a> {
    Single(&'a RegistrationName),
    Phased(&'a BTreeMap<Phase, RegistrationName>),
}

impl DispatchConfig {
    /// Config publishing one registration name.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            registration_name: Some(RegistrationName::new(name)),
            phased_registration_names: None,
        }
    }

    /// Config publishing one registration name per phase.
    pub fn phased(bubbled: impl Into<String>, captured: impl Into<String>) -> Self {
        let mut phases = BTreeMap::new();
        phases.insert(Phase::Bubbled, RegistrationName::new(bubbled));
        phases.insert(Phase::Captured, RegistrationName::new(captured));
        Self {
            registration_name: None,
            phased_registration_names: Some(phases),
        }
    }

    /// A config with neither shape. Only useful for exercising validation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Classify the config. `registration_name` wins when both are present.
    pub fn registration(&self) -> Option<Registration<'_>> {
        match (&self.registration_name, &self.phased_registration_names) {
            (Some(name), _) => Some(Registration::Single(name)),
            (None, Some(phases)) => Some(Registration::Phased(phases)),
            (None, None) => None,
        }
    }

    /// Every registration name this config publishes, in phase order.
    pub fn registration_names(&self) -> Vec<&RegistrationName> {
        match self.registration() {
            Some(Registration::Single(name)) => vec![name],
            Some(Registration::Phased(phases)) => phases.values().collect(),
            None => Vec::new(),
        }
    }
}
