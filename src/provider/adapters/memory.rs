//! In-memory provider directory for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::provider::{
    domain::{Provider, ProviderCode},
    ports::{ProviderDirectory, ProviderDirectoryError, ProviderDirectoryResult},
};

/// Thread-safe in-memory provider directory.
///
/// Every lookup is counted so tests can assert that configuration is
/// resolved afresh rather than cached.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderDirectory {
    providers: Arc<RwLock<HashMap<ProviderCode, Provider>>>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryProviderDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a provider record.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDirectoryError::Persistence`] when lock acquisition
    /// fails.
    pub fn upsert(&self, provider: Provider) -> ProviderDirectoryResult<()> {
        let mut providers = self.providers.write().map_err(|err| {
            ProviderDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        providers.insert(provider.code().clone(), provider);
        Ok(())
    }

    /// Removes a provider record, returning it when present.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDirectoryError::Persistence`] when lock acquisition
    /// fails.
    pub fn remove(&self, code: &ProviderCode) -> ProviderDirectoryResult<Option<Provider>> {
        let mut providers = self.providers.write().map_err(|err| {
            ProviderDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(providers.remove(code))
    }

    /// Returns how many lookups have been served.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderDirectory for InMemoryProviderDirectory {
    async fn find_by_code(&self, code: &ProviderCode) -> ProviderDirectoryResult<Option<Provider>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let providers = self.providers.read().map_err(|err| {
            ProviderDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(providers.get(code).cloned())
    }
}
