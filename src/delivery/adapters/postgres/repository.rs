//! `PostgreSQL` message store and attempt log.

use super::{
    models::{AttemptRow, MessageOutcomeChangeset, MessageRow, NewAttemptRow, NewMessageRow},
    schema::{delivery_attempts, messages},
};
use crate::delivery::{
    domain::{
        AttemptNumber, AttemptOutcome, AttemptParams, DeliveryAttempt, Message, MessageId,
        MessageStatus, PersistedMessageData,
    },
    ports::{
        AttemptLog, AttemptLogError, AttemptLogResult, MessageStore, MessageStoreError,
        MessageStoreResult,
    },
};
use crate::provider::domain::ProviderCode;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;
use std::time::Duration;

/// `PostgreSQL` connection pool type used by delivery adapters.
pub type DeliveryPgPool = Pool<ConnectionManager<PgConnection>>;

/// Port errors that can wrap an infrastructure failure.
trait PersistenceFailure: Send + 'static {
    fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl PersistenceFailure for MessageStoreError {
    fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for AttemptLogError {
    fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed message store and attempt log.
///
/// Every call checks out its own connection and commits on its own.
#[derive(Debug, Clone)]
pub struct PostgresMessageStore {
    pool: DeliveryPgPool,
}

impl PostgresMessageStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DeliveryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: PersistenceFailure,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::wrap)?;
            f(&mut connection)
        })
        .await
        .map_err(E::wrap)?
    }
}

#[async_trait]
impl MessageStore for PostgresMessageStore {
    async fn create(&self, message: &Message) -> MessageStoreResult<()> {
        let message_id = message.id().clone();
        let new_row = to_new_message_row(message)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(messages::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| insert_error(err, &message_id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, message: &Message) -> MessageStoreResult<()> {
        let message_id = message.id().clone();
        let changeset = MessageOutcomeChangeset {
            status: message.status().as_str().to_owned(),
            attempts: i32::try_from(message.attempts()).map_err(MessageStoreError::persistence)?,
            last_error: message.last_error().map(str::to_owned),
            last_attempt_at: message.last_attempt_at(),
            completed_at: message.completed_at(),
        };
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                messages::table.filter(messages::message_id.eq(message_id.as_str())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(MessageStoreError::persistence)?;
            require_updated(updated, message_id)
        })
        .await
    }

    async fn find_by_id(&self, id: &MessageId) -> MessageStoreResult<Option<Message>> {
        let lookup = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = messages::table
                .filter(messages::message_id.eq(lookup))
                .select(MessageRow::as_select())
                .first::<MessageRow>(connection)
                .optional()
                .map_err(MessageStoreError::persistence)?;
            row.map(row_to_message).transpose()
        })
        .await
    }
}

#[async_trait]
impl AttemptLog for PostgresMessageStore {
    async fn append(&self, attempt: &DeliveryAttempt) -> AttemptLogResult<()> {
        let new_row = to_new_attempt_row(attempt);
        self.run_blocking(move |connection| {
            diesel::insert_into(delivery_attempts::table)
                .values(&new_row)
                .execute(connection)
                .map_err(AttemptLogError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn attempts_for(&self, message_id: &MessageId) -> AttemptLogResult<Vec<DeliveryAttempt>> {
        let lookup = message_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = delivery_attempts::table
                .filter(delivery_attempts::message_id.eq(lookup))
                .order(delivery_attempts::attempt_number.asc())
                .select(AttemptRow::as_select())
                .load::<AttemptRow>(connection)
                .map_err(AttemptLogError::persistence)?;
            rows.into_iter().map(row_to_attempt).collect()
        })
        .await
    }
}

pub(crate) fn insert_error(err: DieselError, message_id: &MessageId) -> MessageStoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            MessageStoreError::DuplicateMessage(message_id.clone())
        }
        _ => MessageStoreError::persistence(err),
    }
}

pub(crate) fn require_updated(updated: usize, message_id: MessageId) -> MessageStoreResult<()> {
    if updated == 0 {
        return Err(MessageStoreError::NotFound(message_id));
    }
    Ok(())
}

pub(crate) fn to_new_message_row(message: &Message) -> MessageStoreResult<NewMessageRow> {
    Ok(NewMessageRow {
        message_id: message.id().as_str().to_owned(),
        provider: message.provider().as_str().to_owned(),
        recipient: message.recipient().to_owned(),
        message_text: message.body().to_owned(),
        metadata: Value::Object(message.metadata().clone()),
        status: message.status().as_str().to_owned(),
        attempts: i32::try_from(message.attempts()).map_err(MessageStoreError::persistence)?,
        created_at: message.created_at(),
    })
}

pub(crate) fn row_to_message(row: MessageRow) -> MessageStoreResult<Message> {
    let MessageRow {
        message_id,
        provider,
        recipient,
        message_text,
        metadata,
        status,
        attempts,
        last_error,
        created_at,
        last_attempt_at,
        completed_at,
    } = row;

    let data = PersistedMessageData {
        id: MessageId::new(message_id).map_err(MessageStoreError::invalid_persisted_data)?,
        provider: ProviderCode::new(provider).map_err(MessageStoreError::invalid_persisted_data)?,
        recipient,
        body: message_text,
        metadata: match metadata {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        },
        status: MessageStatus::try_from(status.as_str())
            .map_err(MessageStoreError::invalid_persisted_data)?,
        attempts: u32::try_from(attempts).map_err(MessageStoreError::invalid_persisted_data)?,
        last_error,
        created_at,
        last_attempt_at,
        completed_at,
    };
    Ok(Message::from_persisted(data))
}

pub(crate) fn to_new_attempt_row(attempt: &DeliveryAttempt) -> NewAttemptRow {
    NewAttemptRow {
        message_id: attempt.message_id().as_str().to_owned(),
        attempt_number: i32::try_from(attempt.attempt_number().value()).unwrap_or(i32::MAX),
        provider: attempt.provider().as_str().to_owned(),
        status: attempt.outcome().as_str().to_owned(),
        response_code: attempt.response_code().map(i32::from),
        response_body: Some(attempt.response_body().to_owned()),
        error_message: attempt.error_message().map(str::to_owned),
        duration_ms: i64::try_from(attempt.duration().as_millis()).unwrap_or(i64::MAX),
        attempted_at: attempt.attempted_at(),
    }
}

pub(crate) fn row_to_attempt(row: AttemptRow) -> AttemptLogResult<DeliveryAttempt> {
    let AttemptRow {
        message_id,
        attempt_number,
        provider,
        status,
        response_code,
        response_body,
        error_message,
        duration_ms,
        attempted_at,
    } = row;

    let number = u32::try_from(attempt_number).map_err(AttemptLogError::invalid_persisted_data)?;
    let code = response_code
        .map(u16::try_from)
        .transpose()
        .map_err(AttemptLogError::invalid_persisted_data)?;
    let millis = u64::try_from(duration_ms).map_err(AttemptLogError::invalid_persisted_data)?;

    Ok(DeliveryAttempt::new(AttemptParams {
        message_id: MessageId::new(message_id).map_err(AttemptLogError::invalid_persisted_data)?,
        attempt_number: AttemptNumber::new(number)
            .map_err(AttemptLogError::invalid_persisted_data)?,
        provider: ProviderCode::new(provider).map_err(AttemptLogError::invalid_persisted_data)?,
        outcome: AttemptOutcome::try_from(status.as_str())
            .map_err(AttemptLogError::invalid_persisted_data)?,
        response_code: code,
        response_body: response_body.unwrap_or_default(),
        error_message,
        duration: Duration::from_millis(millis),
        attempted_at,
    }))
}
