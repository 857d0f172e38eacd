//! Uniform channel response.

use super::ChannelError;
use serde_json::json;

/// Outcome of one channel call.
///
/// `accepted` is the channel's own success condition, which can be stricter
/// than the transport status: the chat relay, for instance, needs an explicit
/// delivery confirmation in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResponse {
    status_code: u16,
    body: String,
    accepted: bool,
}

impl ChannelResponse {
    /// Status reported for failures synthesized inside a channel.
    pub const SYNTHETIC_FAILURE_STATUS: u16 = 500;

    /// Creates a response that satisfied the channel's success condition.
    #[must_use]
    pub fn accepted(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
            accepted: true,
        }
    }

    /// Creates a response that did not satisfy the success condition.
    #[must_use]
    pub fn rejected(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
            accepted: false,
        }
    }

    /// Folds a channel error into a rejected response with a JSON error body.
    #[must_use]
    pub fn from_error(err: &ChannelError) -> Self {
        Self::rejected(
            Self::SYNTHETIC_FAILURE_STATUS,
            json!({ "error": err.to_string() }).to_string(),
        )
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning the raw body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }

    /// Returns whether the channel's success condition was met.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.accepted
    }
}
