use std::collections::HashMap;

use crate::application::errors::CommandError;
use crate::application::messaging::dispatcher::{CommandHandler, HandlerResult};
use crate::application::messaging::parser::CommandParser;
use crate::domain::entities::{AutocompleteCommand, CommandArgs, CommandResponse};
use crate::domain::traits::HostApi;

pub const HELLO_TRIGGER: &str = "hello";

/// Command handler function type. Receives the invocation and the words after the trigger.
pub type CommandFn = Box<dyn Fn(&CommandArgs, &[String]) -> HandlerResult + Send + Sync>;

/// A registered slash command
pub struct Command {
    pub spec: AutocompleteCommand,
    pub handler: CommandFn,
}

impl Command {
    pub fn new<F>(spec: AutocompleteCommand, handler: F) -> Self
    where
        F: Fn(&CommandArgs, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            spec,
            handler: Box::new(handler),
        }
    }
}

/// Service owning the plugin's slash commands
pub struct CommandService {
    commands: HashMap<String, Command>,
    parser: CommandParser,
}

impl CommandService {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            parser: CommandParser::default(),
        }
    }

    /// Build the service with the default commands and register each with the host.
    /// Registration failures are logged; the command stays usable locally.
    pub fn with_host(host: &dyn HostApi) -> Self {
        let mut service = Self::new();
        service.register_defaults();

        for command in service.commands.values() {
            if let Err(e) = host.register_command(&command.spec) {
                host.log_error(
                    "Failed to register command",
                    &[("trigger", command.spec.trigger.as_str()), ("error", e.to_string().as_str())],
                );
            }
        }

        service
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.spec.trigger.to_lowercase(), command);
    }

    pub fn register_defaults(&mut self) {
        let spec = AutocompleteCommand::new(HELLO_TRIGGER)
            .with_display_name("Hello")
            .with_description("Say hello to someone")
            .with_hint("[@username]");

        self.register(Command::new(spec, |_, args| {
            let Some(username) = args.first() else {
                return Ok(CommandResponse::ephemeral("Please specify a username"));
            };
            Ok(CommandResponse::in_channel(format!("Hello, {}", username)))
        }));
    }

    /// Definitions of every registered command
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandService {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for CommandService {
    fn handle(&self, args: &CommandArgs) -> HandlerResult {
        let parsed = self
            .parser
            .parse_args(args)
            .ok_or_else(|| CommandError::InvalidArgs("empty command".to_string()))?;

        match self.commands.get(&parsed.trigger.to_lowercase()) {
            Some(cmd) => (cmd.handler)(args, &parsed.args),
            None => Ok(CommandResponse::ephemeral(format!("Unknown command: {}", args.command))),
        }
    }
}
