//! Domain traits - Abstractions over the host process

pub mod host;
pub mod scheduler;

pub use host::HostApi;
pub use scheduler::{JobFn, JobHandle, RoundedInterval, Scheduler};
