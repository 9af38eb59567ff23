//! Plugins shipped with Plugboard.
//!
//! The default ordering reserves `responder`, `tap` and `before-input` for
//! plugins supplied by the embedder; they stay pending until injected.

use std::sync::Arc;

use tracing::debug;

use plugboard_core::{
    application::ports::PluginCatalog,
    domain::{DispatchConfig, Plugin, PluginName, PluginOrdering},
    error::PlugboardResult,
};

use crate::extractors::{DispatchExtractor, TriggerExtractor};

/// Default global priority, highest first.
pub const DEFAULT_ORDERING: &[&str] = &[
    "responder",
    "simple",
    "tap",
    "enter-leave",
    "change",
    "select",
    "before-input",
];

const ENTER_LEAVE: TriggerExtractor = TriggerExtractor::new(&[
    ("mouseout", &["mouseLeave", "mouseEnter"]),
    ("mouseover", &["mouseLeave", "mouseEnter"]),
]);

const CHANGE: TriggerExtractor = TriggerExtractor::new(&[
    ("change", &["change"]),
    ("input", &["change"]),
    ("click", &["change"]),
]);

const SELECT: TriggerExtractor = TriggerExtractor::new(&[
    ("select", &["select"]),
    ("selectionchange", &["select"]),
    ("keyup", &["select"]),
    ("mouseup", &["select"]),
]);

/// Catalog of the built-in plugin set.
///
/// Plugins are built once at construction so repeated calls hand out the
/// same identities.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    plugins: Vec<(PluginName, Arc<Plugin>)>,
    supply_ordering: bool,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self {
            plugins: all_plugins(),
            supply_ordering: true,
        }
    }

    /// The built-in plugins that `ordering` names, without the default
    /// ordering. Used when another catalog supplies the ordering.
    pub fn for_ordering(ordering: &PluginOrdering) -> Self {
        let mut plugins = all_plugins();
        plugins.retain(|(name, _)| ordering.contains(name));
        Self {
            plugins,
            supply_ordering: false,
        }
    }

    pub fn default_ordering() -> PluginOrdering {
        DEFAULT_ORDERING.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginCatalog for BuiltinCatalog {
    fn name(&self) -> String {
        "builtin".to_string()
    }

    fn ordering(&self) -> PlugboardResult<Option<PluginOrdering>> {
        Ok(self.supply_ordering.then(Self::default_ordering))
    }

    fn plugins(&self) -> PlugboardResult<Vec<(PluginName, Arc<Plugin>)>> {
        debug!(count = self.plugins.len(), "serving built-in plugins");
        Ok(self.plugins.clone())
    }
}

fn all_plugins() -> Vec<(PluginName, Arc<Plugin>)> {
    vec![
        (PluginName::new("simple"), simple()),
        (PluginName::new("enter-leave"), enter_leave()),
        (PluginName::new("change"), change()),
        (PluginName::new("select"), select()),
    ]
}

fn simple() -> Arc<Plugin> {
    let mut builder = Plugin::builder()
        .extractor(DispatchExtractor)
        .description("Discrete events dispatched one-to-one");

    for (event, bubbled) in [
        ("click", "onClick"),
        ("keydown", "onKeyDown"),
        ("keyup", "onKeyUp"),
        ("focus", "onFocus"),
        ("blur", "onBlur"),
        ("submit", "onSubmit"),
    ] {
        builder = builder.event_type(
            event,
            DispatchConfig::phased(bubbled, format!("{bubbled}Capture")),
        );
    }

    builder.build()
}

fn enter_leave() -> Arc<Plugin> {
    Plugin::builder()
        .extractor(ENTER_LEAVE)
        .description("Pointer enter/leave pairs derived from mouseout and mouseover")
        .event_type("mouseEnter", DispatchConfig::single("onMouseEnter"))
        .event_type("mouseLeave", DispatchConfig::single("onMouseLeave"))
        .build()
}

fn change() -> Arc<Plugin> {
    Plugin::builder()
        .extractor(CHANGE)
        .description("Normalized value changes across form controls")
        .event_type("change", DispatchConfig::phased("onChange", "onChangeCapture"))
        .build()
}

fn select() -> Arc<Plugin> {
    Plugin::builder()
        .extractor(SELECT)
        .description("Selection changes in text inputs")
        .event_type("select", DispatchConfig::phased("onSelect", "onSelectCapture"))
        .build()
}
