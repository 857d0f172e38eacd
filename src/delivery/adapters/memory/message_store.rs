//! In-memory message store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::delivery::{
    domain::{Message, MessageId},
    ports::{MessageStore, MessageStoreError, MessageStoreResult},
};

/// Thread-safe in-memory message store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    messages: Arc<RwLock<HashMap<MessageId, Message>>>,
}

impl InMemoryMessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored message, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::Persistence`] if the lock is poisoned.
    pub fn messages(&self) -> MessageStoreResult<Vec<Message>> {
        let messages = self.messages.read().map_err(poisoned)?;
        let mut all: Vec<Message> = messages.values().cloned().collect();
        all.sort_by_key(Message::created_at);
        Ok(all)
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> MessageStoreError {
    MessageStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn create(&self, message: &Message) -> MessageStoreResult<()> {
        let mut messages = self.messages.write().map_err(poisoned)?;
        if messages.contains_key(message.id()) {
            return Err(MessageStoreError::DuplicateMessage(message.id().clone()));
        }
        messages.insert(message.id().clone(), message.clone());
        Ok(())
    }

    async fn update(&self, message: &Message) -> MessageStoreResult<()> {
        let mut messages = self.messages.write().map_err(poisoned)?;
        let stored = messages
            .get_mut(message.id())
            .ok_or_else(|| MessageStoreError::NotFound(message.id().clone()))?;
        *stored = message.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &MessageId) -> MessageStoreResult<Option<Message>> {
        let messages = self.messages.read().map_err(poisoned)?;
        Ok(messages.get(id).cloned())
    }
}
