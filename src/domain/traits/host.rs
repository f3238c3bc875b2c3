use crate::application::errors::HostError;
use crate::domain::entities::{AutocompleteCommand, Configuration, UserProfile};

/// HostApi trait - the calls the plugin makes back into the host process
pub trait HostApi: Send + Sync {
    /// Persist a user record, returning the stored version
    fn update_user(&self, user: &UserProfile) -> Result<UserProfile, HostError>;

    /// Load the plugin's current settings
    fn load_configuration(&self) -> Result<Configuration, HostError>;

    /// Register a slash command so the host routes it to this plugin
    fn register_command(&self, command: &AutocompleteCommand) -> Result<(), HostError>;

    // Fire-and-forget diagnostics. `fields` are key/value pairs.
    fn log_error(&self, message: &str, fields: &[(&str, &str)]);
    fn log_warn(&self, message: &str, fields: &[(&str, &str)]);
    fn log_info(&self, message: &str, fields: &[(&str, &str)]);
}
