//! Result reported to callers of a submission.

use super::MessageId;
use crate::provider::domain::ProviderCode;
use serde::{Deserialize, Serialize};

/// Final outcome of one submission.
///
/// A failed delivery is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryReport {
    /// An attempt succeeded.
    Delivered {
        /// Message identifier.
        message_id: MessageId,
        /// Provider code.
        provider: ProviderCode,
        /// Attempts made, including the successful one.
        attempts: u32,
    },
    /// Every attempt failed.
    Failed {
        /// Message identifier.
        message_id: MessageId,
        /// Provider code.
        provider: ProviderCode,
        /// Attempts made.
        attempts: u32,
        /// Error text of the last attempt.
        last_error: String,
    },
}

impl DeliveryReport {
    /// Returns the message identifier.
    #[must_use]
    pub const fn message_id(&self) -> &MessageId {
        match self {
            Self::Delivered { message_id, .. } | Self::Failed { message_id, .. } => message_id,
        }
    }

    /// Returns the number of attempts made.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Delivered { attempts, .. } | Self::Failed { attempts, .. } => *attempts,
        }
    }

    /// Returns whether the message was delivered.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}
