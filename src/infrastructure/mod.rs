//! Infrastructure layer - The in-process console host
//!
//! This layer contains:
//! - Config: Console host configuration loading
//! - Scheduler: Tokio-backed recurring jobs
//! - Adapters: Host implementations (console)

pub mod config;
pub mod scheduler;
pub mod adapters;
