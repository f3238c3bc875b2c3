//! Configuration management for the console host

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;
use crate::domain::entities::{Configuration, UserProfile};

/// Console host configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub plugin: Configuration,
    /// Users the host knows about at startup
    #[serde(default)]
    pub users: Vec<UserProfile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "console".to_string(),
            },
            plugin: Configuration::default(),
            users: vec![
                UserProfile::new("u1").with_username("alice").with_name("Mary_Jane", "Watson"),
                UserProfile::new("u2").with_username("bob").with_name("Bob", "Lee"),
            ],
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue("server.name must not be empty".to_string()));
        }
        if let Some(user) = self.users.iter().find(|u| u.id.is_empty()) {
            return Err(ConfigError::InvalidValue(format!("user '{}' has an empty id", user.username)));
        }
        Ok(())
    }

    pub fn load_env() -> Self {
        Config::default().with_env()
    }

    /// Apply environment overrides
    pub fn with_env(mut self) -> Self {
        if let Ok(value) = std::env::var("PLUGIN_FORMAT_ON_LOGIN") {
            match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.plugin.format_on_login = true,
                "0" | "false" | "no" => self.plugin.format_on_login = false,
                other => tracing::warn!("Ignoring PLUGIN_FORMAT_ON_LOGIN={}", other),
            }
        }

        if let Ok(name) = std::env::var("PLUGIN_SERVER_NAME") {
            self.server.name = name;
        }

        self
    }
}
