//! `PostgreSQL` provider directory.

use super::{models::ProviderRow, schema::providers};
use crate::provider::{
    domain::{CredentialBundle, Provider, ProviderCode, ProviderDomainError, ProviderKind},
    ports::{ProviderDirectory, ProviderDirectoryError, ProviderDirectoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::debug;

/// `PostgreSQL` connection pool type used by the provider directory.
pub type ProviderPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed provider directory.
#[derive(Debug, Clone)]
pub struct PostgresProviderDirectory {
    pool: ProviderPgPool,
}

impl PostgresProviderDirectory {
    /// Creates a directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProviderPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProviderDirectory for PostgresProviderDirectory {
    async fn find_by_code(&self, code: &ProviderCode) -> ProviderDirectoryResult<Option<Provider>> {
        let pool = self.pool.clone();
        let lookup = code.as_str().to_owned();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProviderDirectoryError::persistence)?;
            let row = providers::table
                .filter(providers::provider_code.eq(lookup))
                .select(ProviderRow::as_select())
                .first::<ProviderRow>(&mut connection)
                .optional()
                .map_err(ProviderDirectoryError::persistence)?;
            row.map_or(Ok(None), row_to_provider)
        })
        .await
        .map_err(ProviderDirectoryError::persistence)?
    }
}

/// Converts a stored row; a row without a display name counts as absent.
pub(crate) fn row_to_provider(row: ProviderRow) -> ProviderDirectoryResult<Option<Provider>> {
    let ProviderRow {
        provider_code,
        provider_name,
        provider_type,
        is_active,
        config,
    } = row;

    let code =
        ProviderCode::new(provider_code).map_err(ProviderDirectoryError::invalid_persisted_data)?;
    let kind = ProviderKind::from_type(provider_type.as_deref());
    let credentials = config.map(CredentialBundle::from_value).unwrap_or_default();

    match Provider::new(code.clone(), provider_name, kind) {
        Ok(provider) => Ok(Some(
            provider
                .with_active(is_active)
                .with_credentials(credentials),
        )),
        Err(ProviderDomainError::EmptyDisplayName) => {
            debug!(provider = %code, "provider row has no display name");
            Ok(None)
        }
        Err(err) => Err(ProviderDirectoryError::invalid_persisted_data(err)),
    }
}
