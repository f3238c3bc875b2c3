//! Tokio-backed recurring job scheduler for the console host

use chrono::Utc;
use std::sync::{Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::application::errors::HostError;
use crate::domain::traits::{JobFn, JobHandle, RoundedInterval, Scheduler};

/// Runs jobs on a tokio runtime. Each job body runs on the blocking pool.
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running on
    pub fn current() -> Result<Self, HostError> {
        let handle = Handle::try_current().map_err(|e| HostError::Schedule(e.to_string()))?;
        Ok(Self::new(handle))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(
        &self,
        name: &str,
        policy: RoundedInterval,
        body: JobFn,
    ) -> Result<Box<dyn JobHandle>, HostError> {
        let job_name = name.to_string();
        let task = self.handle.spawn(async move {
            let mut last_finished = None;
            loop {
                let wait = policy.next_wait(Utc::now(), last_finished);
                tokio::time::sleep(wait).await;

                tracing::debug!(job = %job_name, "Running scheduled job");
                let body = body.clone();
                if let Err(e) = tokio::task::spawn_blocking(move || body()).await {
                    tracing::error!(job = %job_name, "Scheduled job failed: {}", e);
                }
                last_finished = Some(Utc::now());
            }
        });

        tracing::info!(job = %name, interval_secs = policy.interval().as_secs(), "Scheduled job");
        Ok(Box::new(TokioJob {
            name: name.to_string(),
            task: Mutex::new(Some(task)),
        }))
    }
}

struct TokioJob {
    name: String,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl JobHandle for TokioJob {
    fn close(&self) -> Result<(), HostError> {
        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| HostError::JobClosed(self.name.clone()))?;

        task.abort();
        tracing::info!(job = %self.name, "Closed job");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn requires_a_runtime() {
        assert!(matches!(TokioScheduler::current(), Err(HostError::Schedule(_))));
    }

    #[tokio::test]
    async fn runs_once_then_waits_for_the_hour() {
        let scheduler = TokioScheduler::current().unwrap();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let job = scheduler
            .schedule(
                "test",
                RoundedInterval::hourly(),
                Arc::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        for _ in 0..100 {
            if runs.load(Ordering::SeqCst) > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        job.close().unwrap();
        assert!(matches!(job.close(), Err(HostError::JobClosed(name)) if name == "test"));
    }
}
