//! Error types for delivery domain validation and parsing.

use super::MessageStatus;
use thiserror::Error;

/// Errors returned while constructing or mutating delivery values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryDomainError {
    /// The recipient is empty after trimming.
    #[error("recipient must not be empty")]
    EmptyRecipient,

    /// The provider code is empty after trimming.
    #[error("provider code must not be empty")]
    EmptyProviderCode,

    /// The message body is empty after trimming.
    #[error("message body must not be empty")]
    EmptyBody,

    /// The message identifier does not follow the `msg_<16 hex>` format.
    #[error("invalid message id '{0}', expected msg_ followed by 16 hex digits")]
    InvalidMessageId(String),

    /// Attempt numbers start at one.
    #[error("invalid attempt number {0}, expected a positive integer")]
    InvalidAttemptNumber(u32),

    /// The status change is not allowed from the current status.
    #[error("cannot transition message from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: MessageStatus,
        /// Requested status.
        to: MessageStatus,
    },
}

/// Error returned while parsing message statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown message status: {0}")]
pub struct ParseMessageStatusError(pub String);

/// Error returned while parsing attempt outcomes from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown attempt outcome: {0}")]
pub struct ParseAttemptOutcomeError(pub String);
