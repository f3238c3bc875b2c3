//! Console host for development/testing
//!
//! Implements the host surface in-process: users live in memory, host log
//! calls go to `tracing`, settings come from the YAML config.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use crate::application::errors::HostError;
use crate::domain::entities::{AutocompleteCommand, Configuration, UserProfile};
use crate::domain::traits::HostApi;
use crate::infrastructure::config::Config;

pub struct ConsoleHost {
    name: String,
    config_path: Option<PathBuf>,
    configuration: RwLock<Configuration>,
    users: RwLock<HashMap<String, UserProfile>>,
    commands: RwLock<Vec<AutocompleteCommand>>,
}

impl ConsoleHost {
    pub fn new(config: &Config) -> Self {
        let users = config
            .users
            .iter()
            .map(|u| (u.id.clone(), u.clone()))
            .collect();

        Self {
            name: config.server.name.clone(),
            config_path: None,
            configuration: RwLock::new(config.plugin.clone()),
            users: RwLock::new(users),
            commands: RwLock::new(Vec::new()),
        }
    }

    /// Re-read plugin settings from this file on every configuration load
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_user(&self, id: &str) -> Option<UserProfile> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Insert or replace a user without going through the plugin API
    pub fn upsert_user(&self, user: UserProfile) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.id.clone(), user);
    }

    pub fn users(&self) -> Vec<UserProfile> {
        let mut users: Vec<UserProfile> = self
            .users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    pub fn registered_commands(&self) -> Vec<AutocompleteCommand> {
        self.commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_configuration(&self, configuration: Configuration) {
        *self
            .configuration
            .write()
            .unwrap_or_else(PoisonError::into_inner) = configuration;
    }
}

fn render_fields(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={:?}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

impl HostApi for ConsoleHost {
    fn update_user(&self, user: &UserProfile) -> Result<UserProfile, HostError> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| HostError::UserNotFound(user.id.clone()))?;

        *stored = user.clone();
        Ok(stored.clone())
    }

    fn load_configuration(&self) -> Result<Configuration, HostError> {
        if let Some(path) = &self.config_path {
            let config = Config::load(path)
                .map_err(|e| HostError::Configuration(e.to_string()))?
                .with_env();
            self.set_configuration(config.plugin);
        }

        Ok(self
            .configuration
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn register_command(&self, command: &AutocompleteCommand) -> Result<(), HostError> {
        let mut commands = self.commands.write().unwrap_or_else(PoisonError::into_inner);
        // Re-activation registers the same trigger again
        if let Some(existing) = commands.iter_mut().find(|c| c.matches(&command.trigger)) {
            tracing::debug!("Replacing command: /{}", command.trigger);
            *existing = command.clone();
            return Ok(());
        }

        tracing::info!("Registered command: /{}", command.trigger);
        commands.push(command.clone());
        Ok(())
    }

    fn log_error(&self, message: &str, fields: &[(&str, &str)]) {
        tracing::error!(host = %self.name, fields = %render_fields(fields), "{}", message);
    }

    fn log_warn(&self, message: &str, fields: &[(&str, &str)]) {
        tracing::warn!(host = %self.name, fields = %render_fields(fields), "{}", message);
    }

    fn log_info(&self, message: &str, fields: &[(&str, &str)]) {
        tracing::info!(host = %self.name, fields = %render_fields(fields), "{}", message);
    }
}
