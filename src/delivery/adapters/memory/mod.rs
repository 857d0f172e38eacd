//! In-memory delivery stores for tests and local runs.

mod attempt_log;
mod message_store;

pub use attempt_log::InMemoryAttemptLog;
pub use message_store::InMemoryMessageStore;
