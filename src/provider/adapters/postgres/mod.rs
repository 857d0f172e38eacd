//! `PostgreSQL` adapter for provider configuration lookup.

pub(crate) mod models;
mod repository;
mod schema;

pub use repository::{PostgresProviderDirectory, ProviderPgPool};

#[cfg(test)]
pub(crate) use repository::row_to_provider;
