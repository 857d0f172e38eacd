//! Domain model for message delivery.
//!
//! A [`Message`] is created `pending` and transitions exactly once to a
//! terminal status. Each dispatch produces one [`DeliveryAttempt`].

mod attempt;
mod error;
mod ids;
mod message;
mod report;

pub use attempt::{AttemptOutcome, AttemptParams, DeliveryAttempt};
pub use error::{DeliveryDomainError, ParseAttemptOutcomeError, ParseMessageStatusError};
pub use ids::{AttemptNumber, MessageId};
pub use message::{Message, MessageDraft, MessageStatus, PersistedMessageData};
pub use report::DeliveryReport;
