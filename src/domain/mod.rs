//! Domain layer - Records and host abstractions with no host-specific code
//!
//! This layer contains:
//! - Entities: Records exchanged with the host (UserProfile, CommandArgs, Configuration)
//! - Traits: The host surface the plugin calls into (HostApi, Scheduler)

pub mod entities;
pub mod traits;
