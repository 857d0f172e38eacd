//! Channel failure taxonomy.
//!
//! These errors never leave a channel: each is folded into a non-accepted
//! [`super::ChannelResponse`] so the delivery loop treats all failures alike.

use crate::provider::domain::ProviderDomainError;
use std::time::Duration;
use thiserror::Error;

/// Failures raised while performing a channel call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// The remote service did not answer within the channel timeout.
    #[error("Request timeout after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider's credential bundle is incomplete.
    #[error(transparent)]
    Credentials(#[from] ProviderDomainError),

    /// The configured endpoint cannot be used.
    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    /// The outbound payload could not be encoded or signed.
    #[error("could not prepare request: {0}")]
    Encoding(String),
}

impl ChannelError {
    /// Classifies an HTTP client error.
    #[must_use]
    pub fn from_http(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(err.to_string())
        }
    }
}
