//! Plugin system
//!
//! Defines the callback surface a host drives (`Plugin`), the host-side
//! manager that drives it, and the display-name plugin itself.

pub mod manager;
pub mod trait_def;
pub mod name_format;

pub use manager::{PluginInfo, PluginManager};
pub use name_format::NameFormatPlugin;
pub use trait_def::{HookContext, Plugin, PluginManifest};
