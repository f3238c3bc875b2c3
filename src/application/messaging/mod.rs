//! Command handling - Parsing and dispatching slash commands

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{CommandDispatcher, CommandHandler, HandlerResult};
pub use parser::{CommandParser, ParsedCommand};
