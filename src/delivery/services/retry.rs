//! Retry schedule and attempt-log guarantees.

use crate::delivery::domain::AttemptNumber;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_DELAYS_SECS: [u64; 3] = [0, 1, 3];

/// Upper bound on attempts per submission.
pub const MAX_ATTEMPTS: usize = 3;

/// Error returned for an unusable retry schedule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RetryPolicyError {
    /// The schedule has no attempts.
    #[error("retry schedule must contain at least one attempt")]
    Empty,
    /// The schedule allows more attempts than a submission may make.
    #[error("retry schedule allows at most {MAX_ATTEMPTS} attempts, got {0}")]
    TooLong(usize),
}

/// Fixed retry schedule: one wait per attempt, applied before that attempt.
///
/// There is no growth factor and no jitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl RetryPolicy {
    /// Creates a policy from per-attempt waits.
    ///
    /// # Errors
    ///
    /// Returns [`RetryPolicyError::Empty`] for an empty schedule and
    /// [`RetryPolicyError::TooLong`] past [`MAX_ATTEMPTS`] waits.
    pub fn new(delays: impl IntoIterator<Item = Duration>) -> Result<Self, RetryPolicyError> {
        let schedule: Vec<Duration> = delays.into_iter().collect();
        if schedule.is_empty() {
            return Err(RetryPolicyError::Empty);
        }
        if schedule.len() > MAX_ATTEMPTS {
            return Err(RetryPolicyError::TooLong(schedule.len()));
        }
        Ok(Self { delays: schedule })
    }

    /// Creates a policy from per-attempt waits in whole seconds.
    ///
    /// # Errors
    ///
    /// Fails like [`RetryPolicy::new`].
    pub fn from_secs(delays: &[u64]) -> Result<Self, RetryPolicyError> {
        Self::new(delays.iter().copied().map(Duration::from_secs))
    }

    /// Returns the number of attempts the policy allows.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        u32::try_from(self.delays.len()).unwrap_or(u32::MAX)
    }

    /// Returns the wait before `attempt`, or `None` past the last attempt.
    #[must_use]
    pub fn delay_before(&self, attempt: AttemptNumber) -> Option<Duration> {
        let index = usize::try_from(attempt.value()).ok()?.checked_sub(1)?;
        self.delays.get(index).copied()
    }

    /// Returns every attempt number paired with its preceding wait.
    pub fn schedule(&self) -> impl Iterator<Item = (AttemptNumber, Duration)> + '_ {
        std::iter::successors(Some(AttemptNumber::FIRST), |number| Some(number.next()))
            .zip(self.delays.iter().copied())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delays: DEFAULT_DELAYS_SECS.map(Duration::from_secs).to_vec(),
        }
    }
}

/// What to do when an attempt record cannot be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptLogDurability {
    /// Log a warning and keep delivering.
    #[default]
    BestEffort,
    /// Abort the submission, leaving the message pending.
    Required,
}
