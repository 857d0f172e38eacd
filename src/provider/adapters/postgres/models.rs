//! Diesel row models for provider configuration.

use super::schema::providers;
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for provider records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = providers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProviderRow {
    /// Unique provider code.
    pub provider_code: String,
    /// Human-readable provider name.
    pub provider_name: String,
    /// Raw channel type.
    pub provider_type: Option<String>,
    /// Active flag.
    pub is_active: bool,
    /// Credential bundle.
    pub config: Option<Value>,
}
