//! Command parser - Splits raw slash-command text into trigger and arguments

use crate::domain::entities::CommandArgs;

/// A parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub trigger: String,
    pub args: Vec<String>,
}

/// Parses slash-command text such as `/hello alice`
pub struct CommandParser {
    command_prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Whether `text` looks like a command at all
    pub fn is_command(&self, text: &str) -> bool {
        text.trim_start().starts_with(&self.command_prefix)
    }

    /// Parse command text. Returns `None` for blank input.
    pub fn parse(&self, text: &str) -> Option<ParsedCommand> {
        let mut parts = text.split_whitespace();
        let first = parts.next()?;
        let trigger = first
            .strip_prefix(self.command_prefix.as_str())
            .unwrap_or(first)
            .to_string();

        Some(ParsedCommand {
            trigger,
            args: parts.map(|s| s.to_string()).collect(),
        })
    }

    /// Parse the command text of host-provided arguments
    pub fn parse_args(&self, args: &CommandArgs) -> Option<ParsedCommand> {
        self.parse(&args.command)
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new("/")
    }
}
