use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::application::errors::HostError;

/// Body of a recurring job
pub type JobFn = Arc<dyn Fn() + Send + Sync>;

/// Scheduler trait - recurring job registration offered by the host
pub trait Scheduler: Send + Sync {
    /// Schedule `body` to run repeatedly under `policy`
    fn schedule(
        &self,
        name: &str,
        policy: RoundedInterval,
        body: JobFn,
    ) -> Result<Box<dyn JobHandle>, HostError>;
}

/// Handle to a scheduled job
pub trait JobHandle: Send + Sync {
    /// Stop the job and release its resources
    fn close(&self) -> Result<(), HostError>;
}

/// Wait policy that aligns runs to multiples of `interval` since the Unix
/// epoch, counted from the end of the previous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundedInterval {
    interval: Duration,
}

impl RoundedInterval {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn hourly() -> Self {
        Self::new(Duration::from_secs(60 * 60))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long to wait before the next run.
    ///
    /// A job that never finished runs immediately. Otherwise the target is
    /// `last_finished + interval` truncated down to the interval grid.
    pub fn next_wait(&self, now: DateTime<Utc>, last_finished: Option<DateTime<Utc>>) -> Duration {
        let Some(last) = last_finished else {
            return Duration::ZERO;
        };

        let step = match i64::try_from(self.interval.as_millis()) {
            Ok(step) if step > 0 => step,
            _ => return Duration::ZERO,
        };

        let Some(next) = last.timestamp_millis().checked_add(step) else {
            return Duration::ZERO;
        };
        let target_ms = next - next.rem_euclid(step);
        let Some(target) = Utc.timestamp_millis_opt(target_ms).single() else {
            return Duration::ZERO;
        };

        (target - now).to_std().unwrap_or(Duration::ZERO)
    }
}
