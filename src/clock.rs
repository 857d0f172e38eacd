//! Schedulable suspension for retry backoff and simulated latency.
//!
//! Wall-clock timestamps come from [`mockable::Clock`]; this module covers the
//! other half of time handling, suspending the current call. Sleeps are plain
//! futures, so a caller-level timeout or cancellation pre-empts them by
//! dropping the future.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Suspends the current task for a duration.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends for `duration`. A zero duration must return promptly.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that records requested durations and returns immediately.
///
/// Lets retry schedules run in tests without real elapsed time.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    requested: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Creates a sleeper with an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every duration requested so far, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<Duration> {
        self.requested
            .lock()
            .map(|durations| durations.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut durations) = self.requested.lock() {
            durations.push(duration);
        }
    }
}
