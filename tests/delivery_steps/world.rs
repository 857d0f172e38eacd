//! Shared world state for message delivery BDD scenarios.

use std::sync::Arc;

use herald::channel::{adapters::ScriptedChannel, services::ChannelRegistry};
use herald::clock::RecordingSleeper;
use herald::delivery::{
    adapters::memory::{InMemoryAttemptLog, InMemoryMessageStore},
    domain::DeliveryReport,
    services::{DeliveryOrchestrator, DeliveryServiceError},
};
use herald::provider::{
    adapters::memory::InMemoryProviderDirectory, services::ProviderConfigResolver,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Orchestrator type used by the BDD world.
pub type TestOrchestrator = DeliveryOrchestrator<
    InMemoryMessageStore,
    InMemoryAttemptLog,
    InMemoryProviderDirectory,
    DefaultClock,
>;

/// Scenario world for message delivery behaviour tests.
pub struct DeliveryWorld {
    pub messages: Arc<InMemoryMessageStore>,
    pub attempts: Arc<InMemoryAttemptLog>,
    pub directory: InMemoryProviderDirectory,
    pub sleeper: RecordingSleeper,
    pub channel: Option<ScriptedChannel>,
    pub last_submit_result: Option<Result<DeliveryReport, DeliveryServiceError>>,
}

impl DeliveryWorld {
    /// Creates a world with empty stores and no scripted channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Arc::new(InMemoryMessageStore::new()),
            attempts: Arc::new(InMemoryAttemptLog::new()),
            directory: InMemoryProviderDirectory::new(),
            sleeper: RecordingSleeper::new(),
            channel: None,
            last_submit_result: None,
        }
    }

    /// Builds an orchestrator over the world's stores and scripted channel.
    ///
    /// # Errors
    ///
    /// Returns an error if no channel script was set up.
    pub fn orchestrator(&self) -> Result<TestOrchestrator, eyre::Report> {
        let channel = self
            .channel
            .clone()
            .ok_or_else(|| eyre::eyre!("missing channel script in scenario world"))?;
        Ok(DeliveryOrchestrator::new(
            Arc::clone(&self.messages),
            Arc::clone(&self.attempts),
            ProviderConfigResolver::new(Arc::new(self.directory.clone())),
            ChannelRegistry::uniform(Arc::new(channel)),
            Arc::new(DefaultClock),
        )
        .with_sleeper(Arc::new(self.sleeper.clone())))
    }

    /// Returns the delivery report of the last submission.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was submitted or the submission failed.
    pub fn report(&self) -> Result<&DeliveryReport, eyre::Report> {
        self.last_submit_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing submission result in scenario world"))?
            .as_ref()
            .map_err(|err| eyre::eyre!("unexpected submission failure: {err}"))
    }
}

impl Default for DeliveryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DeliveryWorld {
    DeliveryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
