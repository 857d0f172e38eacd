//! Persistence ports for message delivery.

pub mod attempt_log;
pub mod message_store;

pub use attempt_log::{AttemptLog, AttemptLogError, AttemptLogResult};
pub use message_store::{MessageStore, MessageStoreError, MessageStoreResult};

#[cfg(test)]
pub use attempt_log::MockAttemptLog;
#[cfg(test)]
pub use message_store::MockMessageStore;
