//! Domain entities - Records exchanged with the host

pub mod user;
pub mod command;
pub mod configuration;

pub use user::UserProfile;
pub use command::{AutocompleteCommand, CommandArgs, CommandResponse, ResponseType};
pub use configuration::Configuration;
