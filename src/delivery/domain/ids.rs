//! Identifier types for the delivery domain.

use super::DeliveryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const MESSAGE_ID_PREFIX: &str = "msg_";
const MESSAGE_ID_HEX_LEN: usize = 16;

/// Externally visible message identifier, `msg_` followed by 16 lowercase
/// hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Generates a fresh identifier from a random v4 UUID.
    #[must_use]
    pub fn generate() -> Self {
        let hex: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(MESSAGE_ID_HEX_LEN)
            .collect();
        Self(format!("{MESSAGE_ID_PREFIX}{hex}"))
    }

    /// Parses a persisted identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDomainError::InvalidMessageId`] when the value does
    /// not follow the identifier format.
    pub fn new(value: impl Into<String>) -> Result<Self, DeliveryDomainError> {
        let raw = value.into();
        let is_valid = raw.strip_prefix(MESSAGE_ID_PREFIX).is_some_and(|hex| {
            hex.len() == MESSAGE_ID_HEX_LEN
                && hex
                    .chars()
                    .all(|ch| ch.is_ascii_digit() || matches!(ch, 'a'..='f'))
        });
        if !is_valid {
            return Err(DeliveryDomainError::InvalidMessageId(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One-based position of an attempt within a message's delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptNumber(u32);

impl AttemptNumber {
    /// The first attempt.
    pub const FIRST: Self = Self(1);

    /// Creates a validated attempt number.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDomainError::InvalidAttemptNumber`] for zero.
    pub const fn new(value: u32) -> Result<Self, DeliveryDomainError> {
        if value == 0 {
            return Err(DeliveryDomainError::InvalidAttemptNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the following attempt number.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AttemptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
