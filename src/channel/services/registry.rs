//! Dispatch table from provider type to channel.

use crate::channel::{
    adapters::{ChatApiChannel, SignedEmailChannel, SimulatedChannel},
    domain::{ChannelError, ChannelRoute},
    ports::ChannelAdapter,
    settings::ChannelSettings,
};
use crate::clock::Sleeper;
use crate::provider::domain::ProviderKind;
use mockable::Clock;
use std::sync::Arc;

/// Holds one adapter per [`ChannelRoute`], built once and shared.
#[derive(Clone)]
pub struct ChannelRegistry {
    chat: Arc<dyn ChannelAdapter>,
    email: Arc<dyn ChannelAdapter>,
    simulated: Arc<dyn ChannelAdapter>,
}

impl std::fmt::Debug for ChannelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelRegistry")
            .field("chat", &self.chat.name())
            .field("email", &self.email.name())
            .field("simulated", &self.simulated.name())
            .finish()
    }
}

impl ChannelRegistry {
    /// Creates a registry from explicit adapters.
    #[must_use]
    pub fn new(
        chat: Arc<dyn ChannelAdapter>,
        email: Arc<dyn ChannelAdapter>,
        simulated: Arc<dyn ChannelAdapter>,
    ) -> Self {
        Self {
            chat,
            email,
            simulated,
        }
    }

    /// Creates a registry with one adapter serving every route.
    #[must_use]
    pub fn uniform(adapter: Arc<dyn ChannelAdapter>) -> Self {
        Self::new(Arc::clone(&adapter), Arc::clone(&adapter), adapter)
    }

    /// Builds the production channels from settings.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when an HTTP client cannot be built or the
    /// email endpoint is invalid.
    pub fn from_settings(
        settings: &ChannelSettings,
        clock: Arc<dyn Clock + Send + Sync>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self, ChannelError> {
        let chat = ChatApiChannel::new(settings.chat.clone())?;
        let email = SignedEmailChannel::new(settings.email.clone(), clock)?;
        let simulated = SimulatedChannel::new(&settings.simulated, sleeper);
        Ok(Self::new(
            Arc::new(chat),
            Arc::new(email),
            Arc::new(simulated),
        ))
    }

    /// Returns the adapter serving a route.
    #[must_use]
    pub fn adapter(&self, route: ChannelRoute) -> &dyn ChannelAdapter {
        match route {
            ChannelRoute::ChatApi => self.chat.as_ref(),
            ChannelRoute::SignedEmail => self.email.as_ref(),
            ChannelRoute::Simulated => self.simulated.as_ref(),
        }
    }

    /// Selects the adapter for a provider type.
    #[must_use]
    pub fn select(&self, kind: &ProviderKind) -> (ChannelRoute, &dyn ChannelAdapter) {
        let route = ChannelRoute::for_kind(kind);
        (route, self.adapter(route))
    }
}
