//! Delivery attempt records.

use super::{AttemptNumber, MessageId, ParseAttemptOutcomeError};
use crate::provider::domain::ProviderCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Outcome of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The channel reported success.
    Success,
    /// The channel answered without success.
    Failed,
    /// No channel response was obtained.
    Error,
}

impl AttemptOutcome {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AttemptOutcome {
    type Error = ParseAttemptOutcomeError;

    fn try_from(value: &str) -> Result<Self, ParseAttemptOutcomeError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            "error" => Ok(Self::Error),
            _ => Err(ParseAttemptOutcomeError(value.to_owned())),
        }
    }
}

/// Parameter object for building a [`DeliveryAttempt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptParams {
    /// Message the attempt belongs to.
    pub message_id: MessageId,
    /// One-based attempt number.
    pub attempt_number: AttemptNumber,
    /// Provider code the attempt was made for.
    pub provider: ProviderCode,
    /// Attempt outcome.
    pub outcome: AttemptOutcome,
    /// Channel status code, absent for `error` attempts.
    pub response_code: Option<u16>,
    /// Raw channel response body, empty for `error` attempts.
    pub response_body: String,
    /// Error text for unsuccessful attempts.
    pub error_message: Option<String>,
    /// Wall time spent in the dispatch.
    pub duration: Duration,
    /// When the attempt was recorded.
    pub attempted_at: DateTime<Utc>,
}

/// Append-only record of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    message_id: MessageId,
    attempt_number: AttemptNumber,
    provider: ProviderCode,
    outcome: AttemptOutcome,
    response_code: Option<u16>,
    response_body: String,
    error_message: Option<String>,
    duration: Duration,
    attempted_at: DateTime<Utc>,
}

impl DeliveryAttempt {
    /// Creates an attempt record.
    #[must_use]
    pub fn new(params: AttemptParams) -> Self {
        Self {
            message_id: params.message_id,
            attempt_number: params.attempt_number,
            provider: params.provider,
            outcome: params.outcome,
            response_code: params.response_code,
            response_body: params.response_body,
            error_message: params.error_message,
            duration: params.duration,
            attempted_at: params.attempted_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn message_id(&self) -> &MessageId {
        &self.message_id
    }

    /// Returns the attempt number.
    #[must_use]
    pub const fn attempt_number(&self) -> AttemptNumber {
        self.attempt_number
    }

    /// Returns the provider code.
    #[must_use]
    pub const fn provider(&self) -> &ProviderCode {
        &self.provider
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> AttemptOutcome {
        self.outcome
    }

    /// Returns the channel status code.
    #[must_use]
    pub const fn response_code(&self) -> Option<u16> {
        self.response_code
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn response_body(&self) -> &str {
        &self.response_body
    }

    /// Returns the error text.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the dispatch duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns when the attempt was recorded.
    #[must_use]
    pub const fn attempted_at(&self) -> DateTime<Utc> {
        self.attempted_at
    }
}
