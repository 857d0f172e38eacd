//! Read-only repository port for provider configuration.

use crate::provider::domain::{Provider, ProviderCode};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for provider directory operations.
pub type ProviderDirectoryResult<T> = Result<T, ProviderDirectoryError>;

/// Provider lookup contract.
///
/// Implementations must read the current record on every call; the delivery
/// pipeline relies on configuration changes being visible to the next
/// attempt of an in-flight delivery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderDirectory: Send + Sync {
    /// Finds a provider by code.
    ///
    /// Returns `None` when no provider has the given code.
    async fn find_by_code(&self, code: &ProviderCode) -> ProviderDirectoryResult<Option<Provider>>;
}

/// Errors returned by provider directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ProviderDirectoryError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted provider data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProviderDirectoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
