//! Diesel row models for delivery persistence.

use super::schema::{delivery_attempts, messages};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for message records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Message identifier.
    pub message_id: String,
    /// Provider code.
    pub provider: String,
    /// Recipient.
    pub recipient: String,
    /// Body.
    pub message_text: String,
    /// Caller metadata.
    pub metadata: Value,
    /// Status.
    pub status: String,
    /// Attempt count.
    pub attempts: i32,
    /// Last error.
    pub last_error: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Final status timestamp.
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// Delivery timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for message records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessageRow {
    /// Message identifier.
    pub message_id: String,
    /// Provider code.
    pub provider: String,
    /// Recipient.
    pub recipient: String,
    /// Body.
    pub message_text: String,
    /// Caller metadata.
    pub metadata: Value,
    /// Status.
    pub status: String,
    /// Attempt count.
    pub attempts: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset for the final status update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = messages)]
#[diesel(treat_none_as_null = true)]
pub struct MessageOutcomeChangeset {
    /// Status.
    pub status: String,
    /// Attempt count.
    pub attempts: i32,
    /// Last error.
    pub last_error: Option<String>,
    /// Final status timestamp.
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// Delivery timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Query result row for attempt records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = delivery_attempts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttemptRow {
    /// Message identifier.
    pub message_id: String,
    /// Attempt number.
    pub attempt_number: i32,
    /// Provider code.
    pub provider: String,
    /// Outcome.
    pub status: String,
    /// Channel status code.
    pub response_code: Option<i32>,
    /// Response body.
    pub response_body: Option<String>,
    /// Error text.
    pub error_message: Option<String>,
    /// Duration in milliseconds.
    pub duration_ms: i64,
    /// Record timestamp.
    pub attempted_at: DateTime<Utc>,
}

/// Insert model for attempt records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = delivery_attempts)]
pub struct NewAttemptRow {
    /// Message identifier.
    pub message_id: String,
    /// Attempt number.
    pub attempt_number: i32,
    /// Provider code.
    pub provider: String,
    /// Outcome.
    pub status: String,
    /// Channel status code.
    pub response_code: Option<i32>,
    /// Response body.
    pub response_body: Option<String>,
    /// Error text.
    pub error_message: Option<String>,
    /// Duration in milliseconds.
    pub duration_ms: i64,
    /// Record timestamp.
    pub attempted_at: DateTime<Utc>,
}
