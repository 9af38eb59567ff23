pub mod dispatch_config;
pub mod event;
pub mod ordering;
pub mod plugin;

pub use dispatch_config::{DispatchConfig, Registration};
pub use event::{NativeEvent, SyntheticEvent};
pub use ordering::PluginOrdering;
pub use plugin::{EventExtractor, EventType, Plugin, PluginBuilder};
