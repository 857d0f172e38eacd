//! Provider type to channel mapping.

use crate::provider::domain::ProviderKind;
use std::fmt;

/// The channel that serves a provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRoute {
    /// Token-authenticated chat relay.
    ChatApi,
    /// Signed transactional email API.
    SignedEmail,
    /// Simulated channel for providers without an integration.
    Simulated,
}

impl ChannelRoute {
    /// Selects the channel for a provider type.
    ///
    /// Total over [`ProviderKind`]: every type not handled by a real
    /// integration goes to [`ChannelRoute::Simulated`].
    #[must_use]
    pub const fn for_kind(kind: &ProviderKind) -> Self {
        match kind {
            ProviderKind::Chat(_) => Self::ChatApi,
            ProviderKind::SignedEmail => Self::SignedEmail,
            ProviderKind::Unintegrated(_) => Self::Simulated,
        }
    }

    /// Returns a short label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChatApi => "chat_api",
            Self::SignedEmail => "signed_email",
            Self::Simulated => "simulated",
        }
    }
}

impl fmt::Display for ChannelRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
