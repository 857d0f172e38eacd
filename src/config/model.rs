//! Configuration model.

use crate::channel::settings::{
    ChannelSettings, ChatApiSettings, SignedEmailSettings, SimulatedSettings,
};
use crate::delivery::services::{AttemptLogDurability, RetryPolicy, RetryPolicyError};
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    /// Retry schedule.
    pub retry: RetrySettings,
    /// Attempt log guarantees.
    pub attempt_log: AttemptLogSettings,
    /// Chat relay channel.
    pub chat: ChatApiSettings,
    /// Signed email channel.
    pub email: SignedEmailSettings,
    /// Simulated channel.
    pub simulated: SimulatedSettings,
    /// Database connection.
    pub database: DatabaseSettings,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            retry: RetrySettings::default(),
            attempt_log: AttemptLogSettings::default(),
            chat: ChatApiSettings::default(),
            email: SignedEmailSettings::default(),
            simulated: SimulatedSettings::default(),
            database: DatabaseSettings::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl HeraldConfig {
    /// Returns the channel settings.
    #[must_use]
    pub fn channels(&self) -> ChannelSettings {
        ChannelSettings {
            chat: self.chat.clone(),
            email: self.email.clone(),
            simulated: self.simulated.clone(),
        }
    }

    /// Builds the retry policy.
    ///
    /// # Errors
    ///
    /// Fails for an empty schedule or one longer than
    /// [`MAX_ATTEMPTS`](crate::delivery::services::MAX_ATTEMPTS).
    pub fn retry_policy(&self) -> Result<RetryPolicy, RetryPolicyError> {
        RetryPolicy::from_secs(&self.retry.delays_secs)
    }
}

/// Retry schedule settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Wait before each attempt, in seconds; one entry per attempt.
    pub delays_secs: Vec<u64>,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            delays_secs: vec![0, 1, 3],
        }
    }
}

/// Attempt log settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttemptLogSettings {
    /// Behaviour when an attempt record cannot be written.
    pub durability: AttemptLogDurability,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// `PostgreSQL` connection URL.
    pub url: Option<String>,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}
