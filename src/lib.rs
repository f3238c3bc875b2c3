//! Chat-server plugin that tidies user first names at login.
//!
//! The host drives the plugin through the [`plugins::Plugin`] callbacks and
//! the plugin calls back through [`domain::traits::HostApi`] and
//! [`domain::traits::Scheduler`]. [`infrastructure`] holds an in-process
//! console host for local runs.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod plugins;

pub use application::formatter::format_first_name;
