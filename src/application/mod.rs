//! Application layer - Plugin logic independent of any host
//!
//! This layer contains:
//! - Formatter: First-name normalisation
//! - Services: The plugin's slash commands
//! - Errors: Error taxonomy and the host error envelope
//! - Messaging: Command parsing and dispatching

pub mod errors;
pub mod formatter;
pub mod services;
pub mod messaging;
