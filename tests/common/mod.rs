//! Host test doubles shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use display_name_plugin::application::errors::HostError;
use display_name_plugin::domain::entities::{AutocompleteCommand, Configuration, UserProfile};
use display_name_plugin::domain::traits::{HostApi, JobFn, JobHandle, RoundedInterval, Scheduler};

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: &'static str,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

/// Host that records every call and can be told to fail
#[derive(Default)]
pub struct RecordingHost {
    pub updates: Mutex<Vec<UserProfile>>,
    pub logs: Mutex<Vec<LogLine>>,
    pub commands: Mutex<Vec<AutocompleteCommand>>,
    pub configuration: Mutex<Configuration>,
    pub fail_update: AtomicBool,
    pub fail_configuration: AtomicBool,
    pub fail_registration: AtomicBool,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    pub fn logs_at(&self, level: &str) -> Vec<LogLine> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.level == level)
            .cloned()
            .collect()
    }

    fn record(&self, level: &'static str, message: &str, fields: &[(&str, &str)]) {
        self.logs.lock().unwrap().push(LogLine {
            level,
            message: message.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }
}

impl HostApi for RecordingHost {
    fn update_user(&self, user: &UserProfile) -> Result<UserProfile, HostError> {
        self.updates.lock().unwrap().push(user.clone());
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(HostError::UpdateUser("database unavailable".into()));
        }
        Ok(user.clone())
    }

    fn load_configuration(&self) -> Result<Configuration, HostError> {
        if self.fail_configuration.load(Ordering::SeqCst) {
            return Err(HostError::Configuration("bad settings".into()));
        }
        Ok(self.configuration.lock().unwrap().clone())
    }

    fn register_command(&self, command: &AutocompleteCommand) -> Result<(), HostError> {
        if self.fail_registration.load(Ordering::SeqCst) {
            return Err(HostError::CommandRegistration("registry offline".into()));
        }
        self.commands.lock().unwrap().push(command.clone());
        Ok(())
    }

    fn log_error(&self, message: &str, fields: &[(&str, &str)]) {
        self.record("error", message, fields);
    }

    fn log_warn(&self, message: &str, fields: &[(&str, &str)]) {
        self.record("warn", message, fields);
    }

    fn log_info(&self, message: &str, fields: &[(&str, &str)]) {
        self.record("info", message, fields);
    }
}

/// Scheduler that keeps the job body so tests can run it by hand
#[derive(Default)]
pub struct ManualScheduler {
    pub scheduled: Mutex<Vec<(String, RoundedInterval, JobFn)>>,
    pub fail_schedule: AtomicBool,
    pub fail_close: AtomicBool,
    pub closes: Arc<AtomicUsize>,
}

impl ManualScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn run_all(&self) {
        for (_, _, body) in self.scheduled.lock().unwrap().iter() {
            body();
        }
    }
}

struct ManualJob {
    fail_close: bool,
    closes: Arc<AtomicUsize>,
}

impl JobHandle for ManualJob {
    fn close(&self) -> Result<(), HostError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(HostError::JobClosed("BackgroundJob".into()));
        }
        Ok(())
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(
        &self,
        name: &str,
        policy: RoundedInterval,
        body: JobFn,
    ) -> Result<Box<dyn JobHandle>, HostError> {
        if self.fail_schedule.load(Ordering::SeqCst) {
            return Err(HostError::Schedule("cluster mutex unavailable".into()));
        }
        self.scheduled
            .lock()
            .unwrap()
            .push((name.to_string(), policy, body));
        Ok(Box::new(ManualJob {
            fail_close: self.fail_close.load(Ordering::SeqCst),
            closes: self.closes.clone(),
        }))
    }
}
