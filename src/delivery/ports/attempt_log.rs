//! Append-only attempt log contract.

use crate::delivery::domain::{DeliveryAttempt, MessageId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for attempt log operations.
pub type AttemptLogResult<T> = Result<T, AttemptLogError>;

/// Append-only record of every dispatch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptLog: Send + Sync {
    /// Appends one attempt record.
    ///
    /// # Errors
    ///
    /// Returns [`AttemptLogError::Persistence`] when the record cannot be
    /// written.
    async fn append(&self, attempt: &DeliveryAttempt) -> AttemptLogResult<()>;

    /// Returns the attempts recorded for a message, ordered by attempt number.
    async fn attempts_for(&self, message_id: &MessageId) -> AttemptLogResult<Vec<DeliveryAttempt>>;
}

/// Errors returned by attempt log implementations.
#[derive(Debug, Clone, Error)]
pub enum AttemptLogError {
    /// A stored row could not be mapped to a domain value.
    #[error("invalid persisted attempt: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttemptLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps a row mapping error.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }
}
