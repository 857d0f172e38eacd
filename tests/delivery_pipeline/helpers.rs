//! Shared fixtures for end-to-end delivery tests.

use herald::channel::{
    services::ChannelRegistry,
    settings::{ChannelSettings, ChatApiSettings, SignedEmailSettings, SimulatedSettings},
};
use herald::clock::RecordingSleeper;
use herald::delivery::{
    adapters::memory::{InMemoryAttemptLog, InMemoryMessageStore},
    domain::{DeliveryAttempt, MessageId},
    ports::AttemptLog,
    services::DeliveryOrchestrator,
};
use herald::provider::{
    adapters::memory::InMemoryProviderDirectory,
    domain::{CredentialBundle, Provider, ProviderCode, ProviderKind},
    services::ProviderConfigResolver,
};
use mockable::DefaultClock;
use std::collections::BTreeMap;
use std::sync::Arc;
use wiremock::MockServer;

/// Relay path for Telegram bot providers.
pub const TELEGRAM_PATH: &str = "/tapi/sync/message/send";
/// Relay path for chat subtypes without a dedicated endpoint.
pub const DEFAULT_CHAT_PATH: &str = "/api/sync/message/send";
/// Path of the send-email resource.
pub const EMAIL_PATH: &str = "/v2/email/outbound-emails";

/// Orchestrator wired to in-memory stores.
pub type PipelineOrchestrator = DeliveryOrchestrator<
    InMemoryMessageStore,
    InMemoryAttemptLog,
    InMemoryProviderDirectory,
    DefaultClock,
>;

/// Stores and sleepers observed by a pipeline test.
pub struct Pipeline {
    pub messages: Arc<InMemoryMessageStore>,
    pub attempts: Arc<InMemoryAttemptLog>,
    pub directory: InMemoryProviderDirectory,
    pub retry_sleeper: RecordingSleeper,
    pub latency_sleeper: RecordingSleeper,
    pub orchestrator: PipelineOrchestrator,
}

impl Pipeline {
    /// Builds a pipeline whose HTTP channels target `server`.
    ///
    /// # Errors
    ///
    /// Returns an error if the channels cannot be built.
    pub fn against(server: &MockServer, simulated_success_rate: f64) -> Result<Self, eyre::Report> {
        let settings = ChannelSettings {
            chat: ChatApiSettings {
                default_endpoint: format!("{}{DEFAULT_CHAT_PATH}", server.uri()),
                endpoints: BTreeMap::from([(
                    "telegram_bot".to_owned(),
                    format!("{}{TELEGRAM_PATH}", server.uri()),
                )]),
                timeout_secs: 2,
            },
            email: SignedEmailSettings {
                endpoint: format!("{}{EMAIL_PATH}", server.uri()),
                ..SignedEmailSettings::default()
            },
            simulated: SimulatedSettings {
                delay_ms: 100,
                success_rate: simulated_success_rate,
                seed: Some(2024),
            },
        };

        let messages = Arc::new(InMemoryMessageStore::new());
        let attempts = Arc::new(InMemoryAttemptLog::new());
        let directory = InMemoryProviderDirectory::new();
        let retry_sleeper = RecordingSleeper::new();
        let latency_sleeper = RecordingSleeper::new();
        let channels = ChannelRegistry::from_settings(
            &settings,
            Arc::new(DefaultClock),
            Arc::new(latency_sleeper.clone()),
        )?;
        let orchestrator = DeliveryOrchestrator::new(
            Arc::clone(&messages),
            Arc::clone(&attempts),
            ProviderConfigResolver::new(Arc::new(directory.clone())),
            channels,
            Arc::new(DefaultClock),
        )
        .with_sleeper(Arc::new(retry_sleeper.clone()));

        Ok(Self {
            messages,
            attempts,
            directory,
            retry_sleeper,
            latency_sleeper,
            orchestrator,
        })
    }

    /// Registers an active provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is invalid or cannot be stored.
    pub fn register(
        &self,
        code: &str,
        provider_type: &str,
        credentials: CredentialBundle,
    ) -> Result<(), eyre::Report> {
        let provider = Provider::new(
            ProviderCode::new(code)?,
            code,
            ProviderKind::from_type(Some(provider_type)),
        )?
        .with_credentials(credentials);
        self.directory.upsert(provider)?;
        Ok(())
    }

    /// Returns the attempt log for a message, ordered by attempt number.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read.
    pub async fn attempts_for(&self, id: &MessageId) -> Result<Vec<DeliveryAttempt>, eyre::Report> {
        Ok(self.attempts.attempts_for(id).await?)
    }
}

/// Chat credentials accepted by the relay mock.
#[must_use]
pub fn chat_credentials() -> CredentialBundle {
    CredentialBundle::default()
        .with("token", "relay-token")
        .with("profile_id", "profile-1")
}

/// Email credentials used to sign requests.
#[must_use]
pub fn email_credentials() -> CredentialBundle {
    CredentialBundle::default()
        .with("access_key", "AKIDEXAMPLE")
        .with("secret_key", "secret")
        .with("from_email", "noreply@example.com")
}
