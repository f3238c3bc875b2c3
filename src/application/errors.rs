//! Application layer errors

use thiserror::Error;

/// HTTP status the host uses for plugin-side command failures
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Activation and configuration errors returned to the host.
/// The host deactivates the plugin when one of these is returned.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("failed to load plugin configuration: {0}")]
    Configuration(#[source] HostError),

    #[error("failed to schedule background job: {0}")]
    Schedule(#[source] HostError),

    #[error("Plugin '{0}' already registered")]
    AlreadyRegistered(String),

    #[error("Plugin '{0}' not found")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures reported by calls into the host
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("failed to update user: {0}")]
    UpdateUser(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("failed to schedule job: {0}")]
    Schedule(String),

    #[error("job already closed: {0}")]
    JobClosed(String),

    #[error("configuration unavailable: {0}")]
    Configuration(String),

    #[error("failed to register command: {0}")]
    CommandRegistration(String),
}

/// Command execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("plugin is not activated")]
    NotActivated,
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error envelope handed back to the host from a command execution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{location}: {id}, {detailed_error}")]
pub struct AppError {
    pub location: String,
    pub id: String,
    pub detailed_error: String,
    pub status_code: u16,
}

impl AppError {
    pub fn new(
        location: impl Into<String>,
        id: impl Into<String>,
        detailed_error: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self {
            location: location.into(),
            id: id.into(),
            detailed_error: detailed_error.into(),
            status_code,
        }
    }

    /// Wrap a failed command execution
    pub fn execute_command(err: &CommandError) -> Self {
        Self::new(
            "ExecuteCommand",
            "plugin.command.execute_command.app_error",
            err.to_string(),
            STATUS_INTERNAL_SERVER_ERROR,
        )
    }
}
