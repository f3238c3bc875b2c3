//! Plugin trait definitions

use serde::{Deserialize, Serialize};

use crate::application::errors::{AppError, PluginError};
use crate::domain::entities::{CommandArgs, CommandResponse, UserProfile};

/// Per-call context the host attaches to hook invocations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookContext {
    pub request_id: String,
}

impl HookContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

/// Lifecycle and hook callbacks the host invokes on a plugin
pub trait Plugin: Send + Sync {
    /// Static description of the plugin
    fn manifest(&self) -> &PluginManifest;

    /// Called once when the plugin is enabled. An error makes the host deactivate it.
    fn on_activate(&self) -> Result<(), PluginError>;

    /// Called when the plugin is disabled or the host shuts down
    fn on_deactivate(&self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called whenever the plugin's settings change on the host
    fn on_configuration_change(&self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Execute a slash command this plugin registered
    fn execute_command(&self, ctx: &HookContext, args: &CommandArgs) -> Result<CommandResponse, AppError>;

    /// Called before a user logs in. A non-empty return value is an error the host surfaces.
    fn user_will_log_in(&self, _ctx: &HookContext, _user: &mut UserProfile) -> String {
        String::new()
    }
}

/// Plugin metadata
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginManifest {
    /// Unique plugin id (required)
    pub id: String,

    /// Display name (required)
    pub name: String,

    /// Plugin version (required)
    pub version: String,

    pub description: Option<String>,

    /// Minimum host version required
    pub min_server_version: Option<String>,
}

impl PluginManifest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            description: None,
            min_server_version: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_min_server_version(mut self, version: impl Into<String>) -> Self {
        self.min_server_version = Some(version.into());
        self
    }
}
