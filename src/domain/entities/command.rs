use serde::{Deserialize, Serialize};

/// Arguments of one slash-command invocation, as handed over by the host.
///
/// The context ids are opaque to the plugin and are never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandArgs {
    pub command: String,
    pub user_id: String,
    pub channel_id: String,
    pub team_id: String,
}

impl CommandArgs {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = team_id.into();
        self
    }
}

/// Where the host should show a command response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Only the invoking user sees it
    #[default]
    Ephemeral,
    /// Posted to the channel
    InChannel,
}

impl ResponseType {
    pub fn as_str(&self) -> &str {
        match self {
            ResponseType::Ephemeral => "ephemeral",
            ResponseType::InChannel => "in_channel",
        }
    }
}

/// Successful command result returned to the host
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct CommandResponse {
    pub response_type: ResponseType,
    pub text: String,
}

impl CommandResponse {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
        }
    }

    pub fn in_channel(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::InChannel,
            text: text.into(),
        }
    }
}

/// Slash command definition registered with the host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AutocompleteCommand {
    pub trigger: String,
    pub display_name: String,
    pub description: String,
    pub hint: Option<String>,
    pub auto_complete: bool,
}

impl AutocompleteCommand {
    pub fn new(trigger: impl Into<String>) -> Self {
        let trigger = trigger.into();
        Self {
            display_name: trigger.clone(),
            trigger,
            description: String::new(),
            hint: None,
            auto_complete: true,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn matches(&self, trigger: &str) -> bool {
        self.trigger.eq_ignore_ascii_case(trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_snake_case() {
        let json = serde_json::to_value(CommandResponse::in_channel("hi")).unwrap();
        assert_eq!(json["response_type"], "in_channel");
        assert_eq!(json["text"], "hi");
        assert_eq!(json["response_type"], ResponseType::InChannel.as_str());
        assert_eq!(ResponseType::default().as_str(), "ephemeral");
    }

    #[test]
    fn autocomplete_matches_case_insensitive() {
        let cmd = AutocompleteCommand::new("hello").with_hint("[username]");
        assert!(cmd.matches("HELLO"));
        assert!(!cmd.matches("help"));
        assert_eq!(cmd.display_name, "hello");
    }
}
