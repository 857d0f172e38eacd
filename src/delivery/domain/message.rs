//! Message aggregate root and its status lifecycle.

use super::{DeliveryDomainError, MessageId, ParseMessageStatusError};
use crate::provider::domain::ProviderCode;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Delivery status of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Created and not yet resolved.
    Pending,
    /// An attempt succeeded.
    Delivered,
    /// Every attempt failed.
    Failed,
}

impl MessageStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        }
    }

    /// Returns whether the status is final.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Failed)
    }

    /// Returns whether a message may move from `self` to `target`.
    ///
    /// Only `pending` may change, and only to a terminal status.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(self, Self::Pending) && target.is_terminal()
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MessageStatus {
    type Error = ParseMessageStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseMessageStatusError(value.to_owned())),
        }
    }
}

/// Validated input for a new message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    provider: ProviderCode,
    recipient: String,
    body: String,
    metadata: Map<String, Value>,
}

impl MessageDraft {
    /// Creates a draft, rejecting a blank recipient or body.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDomainError::EmptyRecipient`] or
    /// [`DeliveryDomainError::EmptyBody`].
    pub fn new(
        provider: ProviderCode,
        recipient: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, DeliveryDomainError> {
        let recipient_value = recipient.into();
        if recipient_value.trim().is_empty() {
            return Err(DeliveryDomainError::EmptyRecipient);
        }
        let body_value = body.into();
        if body_value.trim().is_empty() {
            return Err(DeliveryDomainError::EmptyBody);
        }
        Ok(Self {
            provider,
            recipient: recipient_value,
            body: body_value,
            metadata: Map::new(),
        })
    }

    /// Attaches caller metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the provider code.
    #[must_use]
    pub const fn provider(&self) -> &ProviderCode {
        &self.provider
    }

    /// Returns the recipient.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Returns the body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Message aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    provider: ProviderCode,
    recipient: String,
    body: String,
    metadata: Map<String, Value>,
    status: MessageStatus,
    attempts: u32,
    last_error: Option<String>,
    created_at: DateTime<Utc>,
    last_attempt_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted identifier.
    pub id: MessageId,
    /// Persisted provider code.
    pub provider: ProviderCode,
    /// Persisted recipient.
    pub recipient: String,
    /// Persisted body.
    pub body: String,
    /// Persisted metadata.
    pub metadata: Map<String, Value>,
    /// Persisted status.
    pub status: MessageStatus,
    /// Persisted attempt count.
    pub attempts: u32,
    /// Persisted last error.
    pub last_error: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted timestamp of the final status update.
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// Persisted delivery timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Creates a pending message with a fresh identifier.
    #[must_use]
    pub fn new(draft: MessageDraft, clock: &impl Clock) -> Self {
        let MessageDraft {
            provider,
            recipient,
            body,
            metadata,
        } = draft;
        Self {
            id: MessageId::generate(),
            provider,
            recipient,
            body,
            metadata,
            status: MessageStatus::Pending,
            attempts: 0,
            last_error: None,
            created_at: clock.utc(),
            last_attempt_at: None,
            completed_at: None,
        }
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            provider: data.provider,
            recipient: data.recipient,
            body: data.body,
            metadata: data.metadata,
            status: data.status,
            attempts: data.attempts,
            last_error: data.last_error,
            created_at: data.created_at,
            last_attempt_at: data.last_attempt_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the provider code.
    #[must_use]
    pub const fn provider(&self) -> &ProviderCode {
        &self.provider
    }

    /// Returns the recipient.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Returns the body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the caller metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> MessageStatus {
        self.status
    }

    /// Returns the number of attempts made.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns the error of the last failed attempt, for failed messages.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the final status was recorded.
    #[must_use]
    pub const fn last_attempt_at(&self) -> Option<DateTime<Utc>> {
        self.last_attempt_at
    }

    /// Returns when the message was delivered.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Records a successful delivery after `attempts` attempts.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDomainError::InvalidTransition`] unless the message
    /// is pending.
    pub fn mark_delivered(
        &mut self,
        attempts: u32,
        clock: &impl Clock,
    ) -> Result<(), DeliveryDomainError> {
        self.transition(MessageStatus::Delivered)?;
        let now = clock.utc();
        self.attempts = attempts;
        self.last_error = None;
        self.last_attempt_at = Some(now);
        self.completed_at = Some(now);
        Ok(())
    }

    /// Records a failed delivery after `attempts` attempts.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDomainError::InvalidTransition`] unless the message
    /// is pending.
    pub fn mark_failed(
        &mut self,
        attempts: u32,
        last_error: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), DeliveryDomainError> {
        self.transition(MessageStatus::Failed)?;
        self.attempts = attempts;
        self.last_error = Some(last_error.into());
        self.last_attempt_at = Some(clock.utc());
        Ok(())
    }

    const fn transition(&mut self, target: MessageStatus) -> Result<(), DeliveryDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DeliveryDomainError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }
}
