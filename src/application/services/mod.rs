//! Application services - The plugin's own slash commands

pub mod command_service;

pub use command_service::{Command, CommandService, HELLO_TRIGGER};
