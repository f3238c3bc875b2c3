//! Command dispatcher - Forwards command invocations to the registered handler

use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::domain::entities::{CommandArgs, CommandResponse};

/// Handler result
pub type HandlerResult = Result<CommandResponse, CommandError>;

/// Anything that can answer a slash command
pub trait CommandHandler: Send + Sync {
    fn handle(&self, args: &CommandArgs) -> HandlerResult;
}

impl<F> CommandHandler for F
where
    F: Fn(&CommandArgs) -> HandlerResult + Send + Sync,
{
    fn handle(&self, args: &CommandArgs) -> HandlerResult {
        self(args)
    }
}

/// Routes every invocation, untouched, to one handler
#[derive(Clone)]
pub struct CommandDispatcher {
    handler: Arc<dyn CommandHandler>,
}

impl CommandDispatcher {
    pub fn new(handler: Arc<dyn CommandHandler>) -> Self {
        Self { handler }
    }

    pub fn handle(&self, args: &CommandArgs) -> HandlerResult {
        tracing::debug!(user_id = %args.user_id, channel_id = %args.channel_id, "Dispatching command: {}", args.command);

        let result = self.handler.handle(args);
        if let Err(e) = &result {
            tracing::debug!("Command handler failed: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn success_returns_handler_payload() {
        let dispatcher = CommandDispatcher::new(Arc::new(|args: &CommandArgs| -> HandlerResult {
            Ok(CommandResponse::in_channel(format!("got {}", args.command)))
        }));

        let response = dispatcher.handle(&CommandArgs::new("/x 1")).unwrap();
        assert_eq!(response, CommandResponse::in_channel("got /x 1"));
    }

    #[test]
    fn failure_is_passed_through() {
        let dispatcher = CommandDispatcher::new(Arc::new(|_: &CommandArgs| -> HandlerResult {
            Err(CommandError::ExecutionFailed("nope".into()))
        }));

        let err = dispatcher.handle(&CommandArgs::new("/x")).unwrap_err();
        assert_eq!(err, CommandError::ExecutionFailed("nope".into()));
    }

    #[test]
    fn invocation_is_forwarded_verbatim() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let dispatcher = CommandDispatcher::new(Arc::new(move |args: &CommandArgs| -> HandlerResult {
            sink.lock().unwrap().push(args.clone());
            Ok(CommandResponse::default())
        }));

        let args = CommandArgs::new("/hello  bob ")
            .with_user("u1")
            .with_channel("c1")
            .with_team("t1");
        dispatcher.handle(&args).unwrap();

        assert_eq!(seen.lock().unwrap().as_slice(), &[args]);
    }
}
