//! In-memory attempt log.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::delivery::{
    domain::{DeliveryAttempt, MessageId},
    ports::{AttemptLog, AttemptLogError, AttemptLogResult},
};

/// Thread-safe in-memory attempt log.
///
/// Appends can be switched to fail so callers can observe how write failures
/// are handled.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttemptLog {
    attempts: Arc<RwLock<Vec<DeliveryAttempt>>>,
    fail_appends: Arc<AtomicBool>,
}

impl InMemoryAttemptLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent appends fail (or succeed again).
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Returns every recorded attempt in append order.
    ///
    /// # Errors
    ///
    /// Returns [`AttemptLogError::Persistence`] if the lock is poisoned.
    pub fn all(&self) -> AttemptLogResult<Vec<DeliveryAttempt>> {
        let attempts = self.attempts.read().map_err(poisoned)?;
        Ok(attempts.clone())
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> AttemptLogError {
    AttemptLogError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AttemptLog for InMemoryAttemptLog {
    async fn append(&self, attempt: &DeliveryAttempt) -> AttemptLogResult<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(AttemptLogError::persistence(std::io::Error::other(
                "attempt log unavailable",
            )));
        }
        let mut attempts = self.attempts.write().map_err(poisoned)?;
        attempts.push(attempt.clone());
        Ok(())
    }

    async fn attempts_for(&self, message_id: &MessageId) -> AttemptLogResult<Vec<DeliveryAttempt>> {
        let attempts = self.attempts.read().map_err(poisoned)?;
        let mut matching: Vec<DeliveryAttempt> = attempts
            .iter()
            .filter(|attempt| attempt.message_id() == message_id)
            .cloned()
            .collect();
        matching.sort_by_key(DeliveryAttempt::attempt_number);
        Ok(matching)
    }
}
