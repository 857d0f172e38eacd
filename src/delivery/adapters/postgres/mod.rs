//! `PostgreSQL` adapter for message and attempt persistence.

pub(crate) mod models;
mod repository;
mod schema;

pub use repository::{DeliveryPgPool, PostgresMessageStore};

#[cfg(test)]
pub(crate) use repository::{
    insert_error, require_updated, row_to_attempt, row_to_message, to_new_attempt_row,
    to_new_message_row,
};
