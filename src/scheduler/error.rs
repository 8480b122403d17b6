//! Scheduler error types

use thiserror::Error;

/// Errors surfaced by [`StepScheduler`](super::StepScheduler)
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Delay must be a positive number of milliseconds
    #[error("delay must be greater than zero milliseconds, got {0}")]
    InvalidDelay(i64),

    /// The tick callback failed; the countdown was abandoned at `value`
    #[error("tick callback failed for countdown {handle_id} at value {value}")]
    CallbackFailure {
        handle_id: u64,
        value: i64,
        #[source]
        source: anyhow::Error,
    },
}

impl SchedulerError {
    /// Check if this error came from the caller's tick callback
    pub fn is_callback_failure(&self) -> bool {
        matches!(self, SchedulerError::CallbackFailure { .. })
    }

    /// Tick value at which the countdown stopped, for callback failures
    pub fn failed_value(&self) -> Option<i64> {
        match self {
            SchedulerError::CallbackFailure { value, .. } => Some(*value),
            SchedulerError::InvalidDelay(_) => None,
        }
    }
}
