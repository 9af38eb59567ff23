//! The plugin registry.
//!
//! Composes independently injected plugins into one deterministic dispatch
//! table. Plugins and the ordering may arrive in any interleaving; the
//! registry has two phases:
//!
//! ```text
//!   Unordered ──inject_plugin_order──▶ Ordered
//!       ▲                                 │
//!       └────────────── reset ────────────┘
//! ```
//!
//! While unordered, plugins are recorded without name checks and nothing is
//! published. Once ordered, every injection is checked against the ordering
//! and the derived tables are rebuilt.
//!
//! Every mutating call is all-or-nothing: work happens on a staged copy and
//! is committed only after validation and derivation succeed.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::domain::{
    entities::{NativeEvent, Plugin, PluginOrdering, SyntheticEvent},
    error::DomainError,
    validation::DomainValidator as validator,
    value_objects::{PluginName, RegistrationName},
};

/// Observable registry phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryPhase {
    Unordered,
    Ordered,
}

impl std::fmt::Display for RegistryPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unordered => f.write_str("unordered"),
            Self::Ordered => f.write_str("ordered"),
        }
    }
}

/// A plugin occupying its slot in the ordering.
#[derive(Debug, Clone)]
pub struct PluginSlot {
    pub name: PluginName,
    pub plugin: Arc<Plugin>,
}

/// Tables derived from the ordering and the injected plugins.
#[derive(Debug, Clone, Default)]
struct DispatchTables {
    ordered: Vec<PluginSlot>,
    by_registration_name: HashMap<RegistrationName, Arc<Plugin>>,
    registration_names: Vec<RegistrationName>,
}

#[derive(Debug, Clone, Default)]
enum RegistryState {
    #[default]
    Unordered,
    Ordered {
        ordering: PluginOrdering,
        tables: DispatchTables,
    },
}

/// Registry of event plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins_by_name: BTreeMap<PluginName, Arc<Plugin>>,
    state: RegistryState,
}

impl PluginRegistry {
    /// Create an empty, unordered registry.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Injection
    // -------------------------------------------------------------------------

    /// Inject the global plugin ordering. Allowed once per registry lifetime.
    ///
    /// Plugins injected earlier are published immediately, so collisions and
    /// malformed event types surface from this call. A plugin injected earlier
    /// under a name the ordering lacks fails with `UnknownPluginName`.
    pub fn inject_plugin_order(&mut self, ordering: PluginOrdering) -> Result<(), DomainError> {
        if matches!(self.state, RegistryState::Ordered { .. }) {
            return Err(DomainError::DuplicateOrdering);
        }

        if let Some(orphan) = self
            .plugins_by_name
            .keys()
            .find(|name| !ordering.contains(name))
        {
            return Err(DomainError::UnknownPluginName {
                plugin: orphan.to_string(),
            });
        }

        let tables = derive(&ordering, &self.plugins_by_name)?;
        self.state = RegistryState::Ordered { ordering, tables };
        Ok(())
    }

    /// Inject plugins keyed by slot name.
    ///
    /// Re-injecting the same plugin under the same name is a no-op; a
    /// different plugin under a taken name is a conflict.
    pub fn inject_plugins_by_name<I>(&mut self, plugins: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (PluginName, Arc<Plugin>)>,
    {
        let mut staged = self.plugins_by_name.clone();

        for (name, plugin) in plugins {
            validator::validate_plugin(&name, &plugin)?;

            if let Some(existing) = staged.get(&name) {
                if existing.same_as(&plugin) {
                    continue;
                }
                return Err(DomainError::ConflictingPlugin {
                    plugin: name.to_string(),
                });
            }

            if let RegistryState::Ordered { ordering, .. } = &self.state {
                if !ordering.contains(&name) {
                    return Err(DomainError::UnknownPluginName {
                        plugin: name.to_string(),
                    });
                }
            }

            staged.insert(name, plugin);
        }

        if let RegistryState::Ordered { ordering, tables } = &mut self.state {
            *tables = derive(ordering, &staged)?;
        }
        self.plugins_by_name = staged;
        Ok(())
    }

    /// Clear ordering, plugins and derived tables.
    pub fn reset(&mut self) {
        self.plugins_by_name.clear();
        self.state = RegistryState::Unordered;
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> RegistryPhase {
        match self.state {
            RegistryState::Unordered => RegistryPhase::Unordered,
            RegistryState::Ordered { .. } => RegistryPhase::Ordered,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.phase() == RegistryPhase::Ordered
    }

    pub fn ordering(&self) -> Option<&PluginOrdering> {
        match &self.state {
            RegistryState::Ordered { ordering, .. } => Some(ordering),
            RegistryState::Unordered => None,
        }
    }

    /// Plugins in dispatch priority, with their slot names.
    pub fn ordered_slots(&self) -> &[PluginSlot] {
        self.tables()
            .map(|t| t.ordered.as_slice())
            .unwrap_or_default()
    }

    /// Plugins in dispatch priority.
    pub fn ordered_plugins(&self) -> Vec<Arc<Plugin>> {
        self.ordered_slots()
            .iter()
            .map(|slot| Arc::clone(&slot.plugin))
            .collect()
    }

    /// Every published registration name, in publication order.
    pub fn registration_names(&self) -> &[RegistrationName] {
        self.tables()
            .map(|t| t.registration_names.as_slice())
            .unwrap_or_default()
    }

    pub fn plugin_for_registration_name(&self, name: &str) -> Option<Arc<Plugin>> {
        self.tables()?.by_registration_name.get(name).cloned()
    }

    /// Resolve the plugin that published `event`'s dispatch config.
    ///
    /// `None` when the config is not (yet) published. For phased configs any
    /// phase resolves to the same plugin, so the first hit wins.
    pub fn plugin_for_event(&self, event: &SyntheticEvent) -> Option<Arc<Plugin>> {
        event
            .dispatch_config()
            .registration_names()
            .into_iter()
            .find_map(|name| self.plugin_for_registration_name(name.as_str()))
    }

    /// Slot name a plugin was injected under.
    ///
    /// A plugin injected under several names resolves to its first slot in
    /// the ordering; while unordered, to the first name alphabetically.
    pub fn plugin_name_of(&self, plugin: &Plugin) -> Option<&PluginName> {
        self.ordered_slots()
            .iter()
            .find(|slot| slot.plugin.same_as(plugin))
            .map(|slot| &slot.name)
            .or_else(|| {
                self.plugins_by_name
                    .iter()
                    .find(|(_, p)| p.same_as(plugin))
                    .map(|(name, _)| name)
            })
    }

    /// Names of every injected plugin, published or not.
    pub fn injected_names(&self) -> impl Iterator<Item = &PluginName> {
        self.plugins_by_name.keys()
    }

    pub fn injected_count(&self) -> usize {
        self.plugins_by_name.len()
    }

    /// Ask every ordered plugin to extract events, in priority order.
    ///
    /// A plugin occupying several slots extracts once, at its first slot.
    pub fn extract_events(&self, native: &NativeEvent) -> Vec<SyntheticEvent> {
        let mut seen = HashSet::new();
        self.ordered_slots()
            .iter()
            .filter(|slot| seen.insert(slot.plugin.id()))
            .flat_map(|slot| slot.plugin.extract_events(native))
            .collect()
    }

    fn tables(&self) -> Option<&DispatchTables> {
        match &self.state {
            RegistryState::Ordered { tables, .. } => Some(tables),
            RegistryState::Unordered => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Derivation
// -----------------------------------------------------------------------------

/// Rebuild the dispatch tables from scratch.
///
/// Walks the ordering; names without a plugin are skipped, and a name that
/// repeats keeps only its first slot.
fn derive(
    ordering: &PluginOrdering,
    plugins: &BTreeMap<PluginName, Arc<Plugin>>,
) -> Result<DispatchTables, DomainError> {
    let mut tables = DispatchTables::default();

    for name in ordering.iter() {
        let Some(plugin) = plugins.get(name) else {
            continue;
        };
        if tables.ordered.iter().any(|slot| &slot.name == name) {
            continue;
        }
        publish(name, plugin, &mut tables)?;
        tables.ordered.push(PluginSlot {
            name: name.clone(),
            plugin: Arc::clone(plugin),
        });
    }

    Ok(tables)
}

fn publish(
    name: &PluginName,
    plugin: &Arc<Plugin>,
    tables: &mut DispatchTables,
) -> Result<(), DomainError> {
    for event_type in plugin.event_types() {
        validator::validate_dispatch_config(name, &event_type.name, &event_type.dispatch_config)?;

        for key in event_type.dispatch_config.registration_names() {
            match tables.by_registration_name.get(key) {
                Some(owner) if owner.same_as(plugin) => {}
                Some(_) => {
                    return Err(DomainError::DuplicateRegistrationName {
                        registration_name: key.to_string(),
                    });
                }
                None => {
                    tables
                        .by_registration_name
                        .insert(key.clone(), Arc::clone(plugin));
                    tables.registration_names.push(key.clone());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DispatchConfig, EventType};

    fn noop(_: &[EventType], _: &NativeEvent) -> Vec<SyntheticEvent> {
        Vec::new()
    }

    fn create_plugin() -> Arc<Plugin> {
        Plugin::builder().extractor(noop).build()
    }

    fn order(names: &[&str]) -> PluginOrdering {
        names.iter().copied().collect()
    }

    fn named(pairs: &[(&str, &Arc<Plugin>)]) -> Vec<(PluginName, Arc<Plugin>)> {
        pairs
            .iter()
            .map(|(n, p)| (PluginName::new(*n), Arc::clone(p)))
            .collect()
    }

    fn assert_order(registry: &PluginRegistry, expected: &[&Arc<Plugin>]) {
        let plugins = registry.ordered_plugins();
        assert_eq!(plugins.len(), expected.len());
        for (got, want) in plugins.iter().zip(expected) {
            assert!(got.same_as(want));
        }
    }

    #[test]
    fn ordering_before_plugins() {
        let (one, two, three) = (create_plugin(), create_plugin(), create_plugin());
        let mut registry = PluginRegistry::new();

        registry.inject_plugin_order(order(&["one", "two", "three"])).unwrap();
        registry
            .inject_plugins_by_name(named(&[("one", &one), ("two", &two)]))
            .unwrap();
        registry
            .inject_plugins_by_name(named(&[("three", &three)]))
            .unwrap();

        assert_order(&registry, &[&one, &two, &three]);
    }

    #[test]
    fn plugins_before_and_after_ordering() {
        let (one, two, three) = (create_plugin(), create_plugin(), create_plugin());
        let mut registry = PluginRegistry::new();

        registry
            .inject_plugins_by_name(named(&[("one", &one), ("two", &two)]))
            .unwrap();
        assert!(registry.ordered_plugins().is_empty());
        registry.inject_plugin_order(order(&["one", "two", "three"])).unwrap();
        registry
            .inject_plugins_by_name(named(&[("three", &three)]))
            .unwrap();

        assert_order(&registry, &[&one, &two, &three]);
    }

    #[test]
    fn repeated_and_out_of_order_plugins() {
        let (one, two, three) = (create_plugin(), create_plugin(), create_plugin());
        let mut registry = PluginRegistry::new();

        registry
            .inject_plugins_by_name(named(&[("one", &one), ("three", &three)]))
            .unwrap();
        registry.inject_plugin_order(order(&["one", "two", "three"])).unwrap();
        registry
            .inject_plugins_by_name(named(&[("two", &two), ("three", &three)]))
            .unwrap();

        assert_order(&registry, &[&one, &two, &three]);
    }

    #[test]
    fn missing_extractor_is_rejected_without_side_effects() {
        let bad = Plugin::builder().build();
        let mut registry = PluginRegistry::new();
        registry.inject_plugin_order(order(&["bad"])).unwrap();

        let err = registry
            .inject_plugins_by_name(named(&[("bad", &bad)]))
            .unwrap_err();

        assert_eq!(err, DomainError::MissingCapability { plugin: "bad".into() });
        assert_eq!(registry.injected_count(), 0);
    }

    #[test]
    fn missing_extractor_leaves_published_state_unchanged() {
        let one = Plugin::builder()
            .extractor(noop)
            .event_type("click", DispatchConfig::single("onClick"))
            .build();
        let two = Plugin::builder()
            .extractor(noop)
            .event_type("focus", DispatchConfig::single("onFocus"))
            .build();
        let bad = Plugin::builder()
            .event_type("blur", DispatchConfig::single("onBlur"))
            .build();
        let mut registry = PluginRegistry::new();
        registry.inject_plugin_order(order(&["one", "two", "bad"])).unwrap();
        registry.inject_plugins_by_name(named(&[("one", &one)])).unwrap();

        let err = registry
            .inject_plugins_by_name(named(&[("two", &two), ("bad", &bad)]))
            .unwrap_err();

        assert_eq!(err, DomainError::MissingCapability { plugin: "bad".into() });
        assert_order(&registry, &[&one]);
        assert_eq!(registry.registration_names(), [RegistrationName::new("onClick")]);
        assert_eq!(registry.injected_count(), 1);
        assert!(registry.plugin_for_registration_name("onFocus").is_none());
    }

    #[test]
    fn plugin_outside_ordering_is_rejected() {
        let (one, random) = (create_plugin(), create_plugin());
        let mut registry = PluginRegistry::new();
        registry.inject_plugin_order(order(&["one"])).unwrap();

        let err = registry
            .inject_plugins_by_name(named(&[("one", &one), ("random", &random)]))
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::UnknownPluginName {
                plugin: "random".into()
            }
        );
        // `one` was in the same batch, so it was not committed either.
        assert!(registry.ordered_plugins().is_empty());
    }

    #[test]
    fn ordering_twice_is_rejected() {
        let mut registry = PluginRegistry::new();
        registry.inject_plugin_order(order(&[])).unwrap();
        assert_eq!(
            registry.inject_plugin_order(order(&[])),
            Err(DomainError::DuplicateOrdering)
        );
    }

    #[test]
    fn different_plugins_under_same_name_conflict() {
        let (one, two) = (create_plugin(), create_plugin());
        let mut registry = PluginRegistry::new();
        registry.inject_plugins_by_name(named(&[("same", &one)])).unwrap();

        let err = registry
            .inject_plugins_by_name(named(&[("same", &two)]))
            .unwrap_err();
        assert_eq!(err, DomainError::ConflictingPlugin { plugin: "same".into() });

        // Same object again is fine.
        registry.inject_plugins_by_name(named(&[("same", &one)])).unwrap();
        assert_eq!(registry.injected_count(), 1);
    }

    #[test]
    fn publishes_registration_names() {
        let one = Plugin::builder()
            .extractor(noop)
            .event_type("click", DispatchConfig::single("onClick"))
            .event_type("focus", DispatchConfig::single("onFocus"))
            .build();
        let two = Plugin::builder()
            .extractor(noop)
            .event_type(
                "magic",
                DispatchConfig::phased("onMagicBubble", "onMagicCapture"),
            )
            .build();
        let mut registry = PluginRegistry::new();

        registry.inject_plugins_by_name(named(&[("one", &one)])).unwrap();
        registry.inject_plugin_order(order(&["one", "two"])).unwrap();

        assert_eq!(registry.registration_names().len(), 2);
        assert!(registry.plugin_for_registration_name("onClick").unwrap().same_as(&one));
        assert!(registry.plugin_for_registration_name("onFocus").unwrap().same_as(&one));

        registry.inject_plugins_by_name(named(&[("two", &two)])).unwrap();

        let keys: Vec<_> = registry.registration_names().iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["onClick", "onFocus", "onMagicBubble", "onMagicCapture"]);
        assert!(registry.plugin_for_registration_name("onMagicBubble").unwrap().same_as(&two));
        assert!(registry.plugin_for_registration_name("onMagicCapture").unwrap().same_as(&two));
    }

    #[test]
    fn colliding_registration_names_fail_at_ordering() {
        let one = Plugin::builder()
            .extractor(noop)
            .event_type("photoCapture", DispatchConfig::single("onPhotoCapture"))
            .build();
        let two = Plugin::builder()
            .extractor(noop)
            .event_type("photo", DispatchConfig::phased("onPhotoBubble", "onPhotoCapture"))
            .build();
        let mut registry = PluginRegistry::new();
        registry
            .inject_plugins_by_name(named(&[("one", &one), ("two", &two)]))
            .unwrap();

        let err = registry.inject_plugin_order(order(&["one", "two"])).unwrap_err();

        assert_eq!(
            err,
            DomainError::DuplicateRegistrationName {
                registration_name: "onPhotoCapture".into()
            }
        );
        // The failed ordering was not committed.
        assert_eq!(registry.phase(), RegistryPhase::Unordered);
    }

    #[test]
    fn collision_after_ordering_keeps_last_good_tables() {
        let one = Plugin::builder()
            .extractor(noop)
            .event_type("click", DispatchConfig::single("onClick"))
            .build();
        let two = Plugin::builder()
            .extractor(noop)
            .event_type("tap", DispatchConfig::single("onClick"))
            .build();
        let mut registry = PluginRegistry::new();
        registry.inject_plugin_order(order(&["one", "two"])).unwrap();
        registry.inject_plugins_by_name(named(&[("one", &one)])).unwrap();

        assert!(registry.inject_plugins_by_name(named(&[("two", &two)])).is_err());

        assert_eq!(registry.registration_names().len(), 1);
        assert_eq!(registry.injected_count(), 1);
        assert!(registry.plugin_for_registration_name("onClick").unwrap().same_as(&one));
    }

    #[test]
    fn malformed_event_type_names_event_and_plugin() {
        let one = Plugin::builder()
            .extractor(noop)
            .event_type("badEvent", DispatchConfig::empty())
            .build();
        let mut registry = PluginRegistry::new();
        registry.inject_plugins_by_name(named(&[("one", &one)])).unwrap();

        assert_eq!(
            registry.inject_plugin_order(order(&["one"])),
            Err(DomainError::MalformedEventType {
                event_type: "badEvent".into(),
                plugin: "one".into()
            })
        );
    }

    #[test]
    fn resolves_plugin_from_synthetic_events() {
        let click = DispatchConfig::single("onClick");
        let magic = DispatchConfig::phased("onMagicBubble", "onMagicCapture");
        let one = Plugin::builder()
            .extractor(noop)
            .event_type("click", click.clone())
            .event_type("magic", magic.clone())
            .build();
        let click_event = SyntheticEvent::new("click", click);
        let magic_event = SyntheticEvent::new("magic", magic);
        let mut registry = PluginRegistry::new();

        assert!(registry.plugin_for_event(&click_event).is_none());
        assert!(registry.plugin_for_event(&magic_event).is_none());

        registry.inject_plugins_by_name(named(&[("one", &one)])).unwrap();
        assert!(registry.plugin_for_event(&click_event).is_none());

        registry.inject_plugin_order(order(&["one"])).unwrap();
        assert!(registry.plugin_for_event(&click_event).unwrap().same_as(&one));
        assert!(registry.plugin_for_event(&magic_event).unwrap().same_as(&one));
    }

    #[test]
    fn reset_allows_ordering_again() {
        let one = create_plugin();
        let mut registry = PluginRegistry::new();
        registry.inject_plugin_order(order(&["one"])).unwrap();
        registry.inject_plugins_by_name(named(&[("one", &one)])).unwrap();

        registry.reset();

        assert_eq!(registry.phase(), RegistryPhase::Unordered);
        assert_eq!(registry.injected_count(), 0);
        assert!(registry.registration_names().is_empty());
        assert!(registry.inject_plugin_order(order(&["one"])).is_ok());
    }

    #[test]
    fn plugin_injected_before_ordering_must_get_a_slot() {
        let stray = create_plugin();
        let mut registry = PluginRegistry::new();
        registry.inject_plugins_by_name(named(&[("stray", &stray)])).unwrap();

        assert_eq!(
            registry.inject_plugin_order(order(&["one"])),
            Err(DomainError::UnknownPluginName {
                plugin: "stray".into()
            })
        );
        assert!(!registry.is_ordered());
    }

    #[test]
    fn repeated_slot_keeps_first_position() {
        let (one, two) = (create_plugin(), create_plugin());
        let mut registry = PluginRegistry::new();
        registry.inject_plugin_order(order(&["one", "two", "one"])).unwrap();
        registry
            .inject_plugins_by_name(named(&[("two", &two), ("one", &one)]))
            .unwrap();

        assert_order(&registry, &[&one, &two]);
    }

    #[test]
    fn extract_events_follows_priority() {
        fn echo(types: &[EventType], native: &NativeEvent) -> Vec<SyntheticEvent> {
            types
                .iter()
                .filter(|t| t.name == native.top_level_type)
                .map(|t| SyntheticEvent::new(&t.name, t.dispatch_config.clone()))
                .collect()
        }
        let low = Plugin::builder()
            .extractor(echo)
            .event_type("click", DispatchConfig::single("onLowClick"))
            .build();
        let high = Plugin::builder()
            .extractor(echo)
            .event_type("click", DispatchConfig::single("onHighClick"))
            .build();
        let mut registry = PluginRegistry::new();
        registry.inject_plugin_order(order(&["high", "low"])).unwrap();
        registry
            .inject_plugins_by_name(named(&[("low", &low), ("high", &high)]))
            .unwrap();

        let events = registry.extract_events(&NativeEvent::new("click"));
        let names: Vec<_> = events
            .iter()
            .map(|e| e.dispatch_config.registration_name.as_ref().unwrap().as_str())
            .collect();
        assert_eq!(names, ["onHighClick", "onLowClick"]);
    }

    #[test]
    fn plugin_in_two_slots_extracts_once_and_names_first_slot() {
        fn echo(types: &[EventType], native: &NativeEvent) -> Vec<SyntheticEvent> {
            types
                .iter()
                .filter(|t| t.name == native.top_level_type)
                .map(|t| SyntheticEvent::new(&t.name, t.dispatch_config.clone()))
                .collect()
        }
        let shared = Plugin::builder()
            .extractor(echo)
            .event_type("click", DispatchConfig::single("onClick"))
            .build();
        let mut registry = PluginRegistry::new();
        registry.inject_plugin_order(order(&["zeta", "alpha"])).unwrap();
        registry
            .inject_plugins_by_name(named(&[("alpha", &shared), ("zeta", &shared)]))
            .unwrap();

        assert_eq!(registry.ordered_slots().len(), 2);
        assert_eq!(registry.extract_events(&NativeEvent::new("click")).len(), 1);
        assert_eq!(
            registry.plugin_name_of(&shared).map(PluginName::as_str),
            Some("zeta")
        );
    }

    #[test]
    fn plugin_name_of_reverses_injection() {
        let one = create_plugin();
        let mut registry = PluginRegistry::new();
        registry.inject_plugins_by_name(named(&[("one", &one)])).unwrap();
        assert_eq!(registry.plugin_name_of(&one).map(PluginName::as_str), Some("one"));
        assert!(registry.plugin_name_of(&create_plugin()).is_none());
    }
}
