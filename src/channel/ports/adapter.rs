//! Channel adapter contract.

use crate::channel::domain::{ChannelRequest, ChannelResponse};
use async_trait::async_trait;

/// Sends one message through a provider-specific channel.
///
/// Implementations never fail: timeouts, transport errors, missing
/// credentials, and malformed responses are reported as a non-accepted
/// [`ChannelResponse`] carrying a JSON error body.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Returns a short channel name for logs.
    fn name(&self) -> &'static str;

    /// Performs one send attempt.
    async fn send(&self, request: &ChannelRequest<'_>) -> ChannelResponse;
}
