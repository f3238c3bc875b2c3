use serde::{Deserialize, Serialize};

/// Plugin settings, as loaded from the host on activation and on every
/// configuration change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Rewrite the user's first name at login
    #[serde(default = "default_true")]
    pub format_on_login: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            format_on_login: true,
        }
    }
}
