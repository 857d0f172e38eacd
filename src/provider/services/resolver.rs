//! Fresh, uncached provider configuration resolution.

use crate::provider::{
    domain::{Provider, ProviderCode},
    ports::{ProviderDirectory, ProviderDirectoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while resolving a provider for delivery.
#[derive(Debug, Error)]
pub enum ProviderResolutionError {
    /// No provider is configured under the code.
    #[error("unknown provider: {0}")]
    Unknown(ProviderCode),

    /// The provider exists but is switched off.
    #[error("provider {code} ({display_name}) is currently inactive")]
    Inactive {
        /// Provider code.
        code: ProviderCode,
        /// Provider display name.
        display_name: String,
    },

    /// The directory lookup failed.
    #[error(transparent)]
    Directory(#[from] ProviderDirectoryError),
}

/// Resolves provider state, type, and credentials by code.
///
/// The resolver never caches: each call reaches the directory, so a
/// configuration change takes effect on the very next delivery attempt.
pub struct ProviderConfigResolver<P>
where
    P: ProviderDirectory,
{
    directory: Arc<P>,
}

impl<P> Clone for ProviderConfigResolver<P>
where
    P: ProviderDirectory,
{
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<P> ProviderConfigResolver<P>
where
    P: ProviderDirectory,
{
    /// Creates a resolver over a provider directory.
    #[must_use]
    pub const fn new(directory: Arc<P>) -> Self {
        Self { directory }
    }

    /// Resolves the current provider record.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderResolutionError::Unknown`] when no provider exists
    /// and [`ProviderResolutionError::Directory`] when the lookup fails.
    pub async fn resolve(&self, code: &ProviderCode) -> Result<Provider, ProviderResolutionError> {
        let provider = self
            .directory
            .find_by_code(code)
            .await?
            .ok_or_else(|| ProviderResolutionError::Unknown(code.clone()))?;
        debug!(
            provider = %code,
            kind = %provider.kind(),
            active = provider.is_active(),
            "resolved provider configuration"
        );
        Ok(provider)
    }

    /// Resolves a provider and requires it to be active.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderResolutionError::Inactive`] for a switched-off
    /// provider, plus every error of [`Self::resolve`].
    pub async fn require_active(
        &self,
        code: &ProviderCode,
    ) -> Result<Provider, ProviderResolutionError> {
        let provider = self.resolve(code).await?;
        if !provider.is_active() {
            return Err(ProviderResolutionError::Inactive {
                code: code.clone(),
                display_name: provider.display_name().to_owned(),
            });
        }
        Ok(provider)
    }
}
