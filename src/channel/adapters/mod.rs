//! Channel implementations.
//!
//! - [`ChatApiChannel`]: token-authenticated chat relay
//! - [`SignedEmailChannel`]: transactional email with request signing
//! - [`SimulatedChannel`]: randomized stand-in for unintegrated providers
//! - [`ScriptedChannel`]: deterministic responses for tests and dry runs

mod chat;
mod email;
mod scripted;
pub mod signing;
mod simulated;

pub use chat::{ChatApiChannel, normalize_recipient};
pub use email::{SignedEmailChannel, build_email_payload};
pub use scripted::{RecordedCall, ScriptedChannel};
pub use simulated::SimulatedChannel;
