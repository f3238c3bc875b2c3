//! Display-name plugin
//!
//! Normalises a user's first name at login, answers the `/hello` command and
//! keeps one hourly background job scheduled on the host.

pub mod configuration;

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::application::errors::{AppError, CommandError, PluginError};
use crate::application::formatter::{FirstNameFormatter, NameFormatter};
use crate::application::messaging::CommandDispatcher;
use crate::application::services::CommandService;
use crate::domain::entities::{CommandArgs, CommandResponse, UserProfile};
use crate::domain::traits::{HostApi, JobHandle, RoundedInterval, Scheduler};
use crate::plugins::trait_def::{HookContext, Plugin, PluginManifest};

pub use configuration::SharedConfiguration;

pub const PLUGIN_ID: &str = "display-name-plugin";
pub const BACKGROUND_JOB_NAME: &str = "BackgroundJob";

/// Returned to the host when the login-time update fails
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update user";

pub struct NameFormatPlugin {
    manifest: PluginManifest,
    host: Arc<dyn HostApi>,
    scheduler: Arc<dyn Scheduler>,
    formatter: Box<dyn NameFormatter>,
    configuration: SharedConfiguration,
    dispatcher: RwLock<Option<CommandDispatcher>>,
    background_job: Mutex<Option<Box<dyn JobHandle>>>,
}

impl NameFormatPlugin {
    pub fn new(host: Arc<dyn HostApi>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            manifest: PluginManifest::new(PLUGIN_ID, "Display Name Formatter", env!("CARGO_PKG_VERSION"))
                .with_description("Normalises user first names at login")
                .with_min_server_version("6.2.1"),
            host,
            scheduler,
            formatter: Box::new(FirstNameFormatter),
            configuration: SharedConfiguration::default(),
            dispatcher: RwLock::new(None),
            background_job: Mutex::new(None),
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn NameFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn configuration(&self) -> &SharedConfiguration {
        &self.configuration
    }

    pub fn is_job_scheduled(&self) -> bool {
        self.background_job
            .lock()
            .map(|job| job.is_some())
            .unwrap_or(false)
    }

    fn close_job(&self, job: Box<dyn JobHandle>) {
        if let Err(e) = job.close() {
            self.host
                .log_error("Failed to close background job", &[("err", e.to_string().as_str())]);
        }
    }
}

fn run_job(host: &dyn HostApi) {
    tracing::debug!("Running {}", BACKGROUND_JOB_NAME);
    host.log_info("Background job is running", &[("job", BACKGROUND_JOB_NAME)]);
}

impl Plugin for NameFormatPlugin {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn on_activate(&self) -> Result<(), PluginError> {
        self.on_configuration_change()?;

        let commands = CommandService::with_host(self.host.as_ref());
        tracing::info!("Registered {} slash command(s)", commands.len());
        *self
            .dispatcher
            .write()
            .map_err(|_| PluginError::Internal("Lock poisoned".to_string()))? =
            Some(CommandDispatcher::new(Arc::new(commands)));

        let host = self.host.clone();
        let job = self
            .scheduler
            .schedule(
                BACKGROUND_JOB_NAME,
                RoundedInterval::hourly(),
                Arc::new(move || run_job(host.as_ref())),
            )
            .map_err(PluginError::Schedule)?;

        let previous = self
            .background_job
            .lock()
            .map_err(|_| PluginError::Internal("Lock poisoned".to_string()))?
            .replace(job);
        if let Some(previous) = previous {
            self.close_job(previous);
        }

        Ok(())
    }

    fn on_deactivate(&self) -> Result<(), PluginError> {
        let job = self
            .background_job
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(job) = job {
            self.close_job(job);
        }

        *self.dispatcher.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    fn on_configuration_change(&self) -> Result<(), PluginError> {
        let configuration = self
            .host
            .load_configuration()
            .map_err(PluginError::Configuration)?;
        self.configuration.set(configuration);
        Ok(())
    }

    fn execute_command(&self, _ctx: &HookContext, args: &CommandArgs) -> Result<CommandResponse, AppError> {
        let dispatcher = self
            .dispatcher
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| AppError::execute_command(&CommandError::NotActivated))?;

        dispatcher
            .handle(args)
            .map_err(|e| AppError::execute_command(&e))
    }

    fn user_will_log_in(&self, _ctx: &HookContext, user: &mut UserProfile) -> String {
        self.host.log_warn(
            "UserWillLogIn hook triggered",
            &[("user_id", user.id.as_str()), ("original_firstname", user.first_name.as_str())],
        );

        if !self.configuration.get().format_on_login {
            self.host
                .log_info("Firstname formatting disabled", &[("user_id", user.id.as_str())]);
            return String::new();
        }

        let formatted = self.formatter.format(&user.first_name);
        if formatted == user.first_name {
            self.host
                .log_info("No update needed for firstname", &[("user_id", user.id.as_str())]);
            return String::new();
        }

        self.host.log_info(
            "Updating firstname",
            &[("user_id", user.id.as_str()), ("new_firstname", formatted.as_str())],
        );

        let mut updated = user.clone();
        updated.first_name = formatted;

        match self.host.update_user(&updated) {
            Ok(_) => {
                user.first_name = updated.first_name;
                self.host.log_info(
                    "Successfully updated user firstname",
                    &[("user_id", user.id.as_str()), ("new_firstname", user.first_name.as_str())],
                );
                String::new()
            }
            Err(e) => {
                self.host.log_error(
                    "Failed to update user",
                    &[("user_id", user.id.as_str()), ("error", e.to_string().as_str())],
                );
                UPDATE_FAILED_MESSAGE.to_string()
            }
        }
    }
}
