//! Plugin manager - drives plugin lifecycle and hooks on behalf of a host

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::application::errors::{AppError, CommandError, PluginError};
use crate::application::messaging::CommandParser;
use crate::domain::entities::{CommandArgs, CommandResponse, UserProfile};
use crate::plugins::trait_def::{HookContext, Plugin, PluginManifest};

/// Manages the plugins loaded into a host
pub struct PluginManager {
    plugins: HashMap<String, Arc<dyn Plugin>>,
    active: HashMap<String, bool>,
    // trigger -> plugin id
    commands: HashMap<String, String>,
    parser: CommandParser,
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
            active: HashMap::new(),
            commands: HashMap::new(),
            parser: CommandParser::default(),
        }
    }

    /// Register a plugin
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> Result<(), PluginError> {
        let id = plugin.manifest().id.clone();

        if self.plugins.contains_key(&id) {
            return Err(PluginError::AlreadyRegistered(id));
        }

        info!("Registering plugin: {}", id);
        self.plugins.insert(id.clone(), plugin);
        self.active.insert(id, false);
        Ok(())
    }

    /// Route a slash-command trigger to a plugin
    pub fn bind_command(&mut self, trigger: &str, plugin_id: &str) -> Result<(), PluginError> {
        if !self.plugins.contains_key(plugin_id) {
            return Err(PluginError::NotFound(plugin_id.to_string()));
        }
        self.commands.insert(trigger.to_lowercase(), plugin_id.to_string());
        Ok(())
    }

    /// Activate a plugin. On failure the plugin stays inactive.
    pub fn activate(&mut self, id: &str) -> Result<(), PluginError> {
        let plugin = self
            .plugins
            .get(id)
            .cloned()
            .ok_or_else(|| PluginError::NotFound(id.to_string()))?;

        if self.is_active(id) {
            return Ok(());
        }

        match plugin.on_activate() {
            Ok(()) => {
                info!("Activated plugin: {}", id);
                self.active.insert(id.to_string(), true);
                Ok(())
            }
            Err(e) => {
                error!("Plugin '{}' failed to activate: {}", id, e);
                if let Err(e) = plugin.on_deactivate() {
                    warn!("Plugin '{}' failed to clean up: {}", id, e);
                }
                self.active.insert(id.to_string(), false);
                Err(e)
            }
        }
    }

    /// Activate every registered plugin, returning the failures
    pub fn activate_all(&mut self) -> Vec<(String, PluginError)> {
        let ids: Vec<String> = self.plugins.keys().cloned().collect();
        ids.into_iter()
            .filter_map(|id| self.activate(&id).err().map(|e| (id, e)))
            .collect()
    }

    /// Deactivate every active plugin
    pub fn deactivate_all(&mut self) {
        for (id, plugin) in &self.plugins {
            if !self.is_active(id) {
                continue;
            }
            if let Err(e) = plugin.on_deactivate() {
                warn!("Plugin '{}' failed to deactivate: {}", id, e);
            }
            info!("Deactivated plugin: {}", id);
        }
        for active in self.active.values_mut() {
            *active = false;
        }
    }

    /// Notify active plugins that their configuration changed
    pub fn reload_configuration(&self) -> Vec<(String, PluginError)> {
        self.active_plugins()
            .filter_map(|(id, plugin)| {
                plugin
                    .on_configuration_change()
                    .err()
                    .map(|e| (id.clone(), e))
            })
            .collect()
    }

    /// Run a slash command through the plugin bound to its trigger
    pub fn execute_command(&self, ctx: &HookContext, args: &CommandArgs) -> Option<Result<CommandResponse, AppError>> {
        let parsed = self.parser.parse_args(args)?;
        let id = self.commands.get(&parsed.trigger.to_lowercase())?;
        let plugin = self.plugins.get(id)?;

        if !self.is_active(id) {
            return Some(Err(AppError::execute_command(&CommandError::NotActivated)));
        }
        Some(plugin.execute_command(ctx, args))
    }

    /// Fire the login hook on every active plugin.
    /// Returns the first rejection, or an empty string.
    pub fn user_will_log_in(&self, ctx: &HookContext, user: &mut UserProfile) -> String {
        for (id, plugin) in self.active_plugins() {
            let rejection = plugin.user_will_log_in(ctx, user);
            if !rejection.is_empty() {
                warn!("Plugin '{}' rejected login of {}: {}", id, user.id, rejection);
                return rejection;
            }
        }
        String::new()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.get(id).copied().unwrap_or(false)
    }

    /// List all registered plugins
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugins
            .iter()
            .map(|(id, plugin)| PluginInfo {
                manifest: plugin.manifest().clone(),
                active: self.is_active(id),
            })
            .collect()
    }

    fn active_plugins(&self) -> impl Iterator<Item = (&String, &Arc<dyn Plugin>)> {
        self.plugins.iter().filter(|(id, _)| self.is_active(id))
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Plugin information for listing
#[derive(Debug, Clone, serde::Serialize)]
pub struct PluginInfo {
    pub manifest: PluginManifest,
    pub active: bool,
}
