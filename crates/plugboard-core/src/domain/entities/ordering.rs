use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PluginName;

/// Global dispatch priority: plugin names, highest priority first.
///
/// Duplicates are not rejected here; a repeated name keeps only its first
/// slot when the registry derives its tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginOrdering(Vec<PluginName>);

impl PluginOrdering {
    pub fn new(names: Vec<PluginName>) -> Self {
        Self(names)
    }

    pub fn contains(&self, name: &PluginName) -> bool {
        self.0.contains(name)
    }

    pub fn position(&self, name: &PluginName) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[PluginName] {
        &self.0
    }
}

impl<S: Into<PluginName>> FromIterator<S> for PluginOrdering {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for PluginOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(PluginName::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
