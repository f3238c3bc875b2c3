//! Slash-command execution through the plugin boundary

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{ensure_init, ManualScheduler, RecordingHost};
use display_name_plugin::application::errors::{CommandError, STATUS_INTERNAL_SERVER_ERROR};
use display_name_plugin::application::messaging::{CommandDispatcher, CommandHandler, HandlerResult};
use display_name_plugin::domain::entities::{CommandArgs, CommandResponse, ResponseType};
use display_name_plugin::plugins::{HookContext, NameFormatPlugin, Plugin};

fn plugin(host: &Arc<RecordingHost>) -> NameFormatPlugin {
    ensure_init();
    NameFormatPlugin::new(host.clone(), ManualScheduler::new())
}

#[test]
fn hello_command_round_trip() {
    let host = RecordingHost::new();
    let plugin = plugin(&host);
    plugin.on_activate().unwrap();

    let args = CommandArgs::new("/hello alice")
        .with_user("u1")
        .with_channel("c1")
        .with_team("t1");
    let response = plugin.execute_command(&HookContext::default(), &args).unwrap();

    assert_eq!(response.text, "Hello, alice");
    assert_eq!(response.response_type, ResponseType::InChannel);
}

#[test]
fn activation_registers_hello() {
    let host = RecordingHost::new();
    plugin(&host).on_activate().unwrap();

    let commands = host.commands.lock().unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].trigger, "hello");
    assert!(commands[0].auto_complete);
}

#[test]
fn registration_failure_is_logged_not_fatal() {
    let host = RecordingHost::new();
    host.fail_registration.store(true, Ordering::SeqCst);
    let plugin = plugin(&host);

    plugin.on_activate().unwrap();

    assert!(host
        .logs_at("error")
        .iter()
        .any(|l| l.message == "Failed to register command"));
    // the handler still answers
    let response = plugin
        .execute_command(&HookContext::default(), &CommandArgs::new("/hello bob"))
        .unwrap();
    assert_eq!(response.text, "Hello, bob");
}

#[test]
fn handler_error_becomes_internal_app_error() {
    let host = RecordingHost::new();
    let plugin = plugin(&host);
    plugin.on_activate().unwrap();

    let err = plugin
        .execute_command(&HookContext::default(), &CommandArgs::new("   "))
        .unwrap_err();

    assert_eq!(err.status_code, STATUS_INTERNAL_SERVER_ERROR);
    assert_eq!(err.id, "plugin.command.execute_command.app_error");
    assert_eq!(
        err.detailed_error,
        CommandError::InvalidArgs("empty command".into()).to_string()
    );
}

#[test]
fn execute_before_activation_fails() {
    let host = RecordingHost::new();
    let err = plugin(&host)
        .execute_command(&HookContext::default(), &CommandArgs::new("/hello x"))
        .unwrap_err();

    assert_eq!(err.status_code, 500);
    assert_eq!(err.detailed_error, CommandError::NotActivated.to_string());
}

struct Failing(&'static str);

impl CommandHandler for Failing {
    fn handle(&self, _args: &CommandArgs) -> HandlerResult {
        Err(CommandError::ExecutionFailed(self.0.to_string()))
    }
}

#[test]
fn dispatcher_reports_handler_message() {
    let dispatcher = CommandDispatcher::new(Arc::new(Failing("db down")));
    let err = dispatcher.handle(&CommandArgs::new("/x")).unwrap_err();
    assert_eq!(err.to_string(), "Execution failed: db down");

    let ok = CommandDispatcher::new(Arc::new(|_: &CommandArgs| -> HandlerResult {
        Ok(CommandResponse::ephemeral("fine"))
    }));
    assert_eq!(ok.handle(&CommandArgs::new("/x")).unwrap().text, "fine");
}
