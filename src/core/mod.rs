// Core plugin logic

pub mod config;
pub mod system_monitor;
pub mod widget;

// Re-export commonly used items
pub use config::PluginConfig;
pub use widget::WidgetController;
