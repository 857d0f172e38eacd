//! Submission, retry, and outcome recording for one message.

use super::{AttemptLogDurability, RetryPolicy};
use crate::channel::{
    domain::{ChannelRequest, ChannelResponse, EmailTemplate},
    services::ChannelRegistry,
};
use crate::clock::{Sleeper, TokioSleeper};
use crate::delivery::{
    domain::{
        AttemptNumber, AttemptOutcome, AttemptParams, DeliveryAttempt, DeliveryDomainError,
        DeliveryReport, Message, MessageDraft,
    },
    ports::{AttemptLog, AttemptLogError, MessageStore, MessageStoreError},
};
use crate::provider::{
    domain::ProviderCode,
    ports::{ProviderDirectory, ProviderDirectoryError},
    services::{ProviderConfigResolver, ProviderResolutionError},
};
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{Span, debug, info, instrument, warn};

/// Request payload for submitting one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitMessageRequest {
    provider: String,
    recipient: String,
    body: String,
    metadata: Map<String, Value>,
    subject: Option<String>,
    template: Option<EmailTemplate>,
}

impl SubmitMessageRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        recipient: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            recipient: recipient.into(),
            body: body.into(),
            metadata: Map::new(),
            subject: None,
            template: None,
        }
    }

    /// Sets caller metadata stored with the message.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets the email subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets an email template. A blank name leaves the request untemplated.
    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>, data: Map<String, Value>) -> Self {
        let template_name = name.into();
        self.template = (!template_name.trim().is_empty())
            .then(|| EmailTemplate::new(template_name).with_data(data));
        self
    }

    /// Returns the provider code as submitted.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }
}

/// Service-level errors for message submission.
///
/// Delivery failure is not among them: it is reported as
/// [`DeliveryReport::Failed`].
#[derive(Debug, Error)]
pub enum DeliveryServiceError {
    /// The request failed validation; nothing was persisted.
    #[error(transparent)]
    InvalidRequest(#[from] DeliveryDomainError),

    /// No provider is configured under the requested code.
    #[error("unknown provider: {0}")]
    UnknownProvider(ProviderCode),

    /// The provider is switched off.
    #[error("provider {code} ({display_name}) is currently inactive")]
    ProviderInactive {
        /// Provider code.
        code: ProviderCode,
        /// Provider display name.
        display_name: String,
    },

    /// The provider directory could not be read during validation.
    #[error(transparent)]
    Directory(ProviderDirectoryError),

    /// The message store failed.
    #[error(transparent)]
    MessageStore(#[from] MessageStoreError),

    /// An attempt record could not be written under
    /// [`AttemptLogDurability::Required`].
    #[error(transparent)]
    AttemptLog(#[from] AttemptLogError),

    /// A status change was rejected by the message lifecycle.
    #[error("message lifecycle violation: {0}")]
    Lifecycle(DeliveryDomainError),
}

impl From<ProviderResolutionError> for DeliveryServiceError {
    fn from(err: ProviderResolutionError) -> Self {
        match err {
            ProviderResolutionError::Unknown(code) => Self::UnknownProvider(code),
            ProviderResolutionError::Inactive { code, display_name } => {
                Self::ProviderInactive { code, display_name }
            }
            ProviderResolutionError::Directory(inner) => Self::Directory(inner),
        }
    }
}

/// Result type for delivery service operations.
pub type DeliveryServiceResult<T> = Result<T, DeliveryServiceError>;

/// Email fields that travel unchanged to every attempt.
#[derive(Clone, Copy)]
struct EmailOptions<'a> {
    subject: Option<&'a str>,
    template: Option<&'a EmailTemplate>,
}

/// Delivers messages through the channel matching each provider's type.
///
/// Attempts run sequentially. Provider configuration is resolved afresh
/// before every attempt, so credential and type changes apply to the next
/// attempt of an in-flight message.
pub struct DeliveryOrchestrator<S, L, P, C>
where
    S: MessageStore,
    L: AttemptLog,
    P: ProviderDirectory,
    C: Clock + Send + Sync,
{
    messages: Arc<S>,
    attempts: Arc<L>,
    resolver: ProviderConfigResolver<P>,
    channels: ChannelRegistry,
    clock: Arc<C>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
    durability: AttemptLogDurability,
}

impl<S, L, P, C> DeliveryOrchestrator<S, L, P, C>
where
    S: MessageStore,
    L: AttemptLog,
    P: ProviderDirectory,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator with the default retry schedule, Tokio sleeps,
    /// and best-effort attempt logging.
    #[must_use]
    pub fn new(
        messages: Arc<S>,
        attempts: Arc<L>,
        resolver: ProviderConfigResolver<P>,
        channels: ChannelRegistry,
        clock: Arc<C>,
    ) -> Self {
        Self {
            messages,
            attempts,
            resolver,
            channels,
            clock,
            sleeper: Arc::new(TokioSleeper),
            policy: RetryPolicy::default(),
            durability: AttemptLogDurability::default(),
        }
    }

    /// Replaces the sleeper used between attempts.
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Replaces the retry schedule.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the attempt-log guarantee.
    #[must_use]
    pub const fn with_attempt_log_durability(mut self, durability: AttemptLogDurability) -> Self {
        self.durability = durability;
        self
    }

    /// Validates, persists, and delivers one message.
    ///
    /// Returns a [`DeliveryReport`] for both delivered and failed messages.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryServiceError::InvalidRequest`],
    /// [`DeliveryServiceError::UnknownProvider`] or
    /// [`DeliveryServiceError::ProviderInactive`] before anything is
    /// persisted, and store errors when persistence fails.
    #[instrument(
        name = "delivery.submit",
        skip_all,
        fields(provider = %request.provider(), message_id = tracing::field::Empty)
    )]
    pub async fn submit(
        &self,
        request: SubmitMessageRequest,
    ) -> DeliveryServiceResult<DeliveryReport> {
        let SubmitMessageRequest {
            provider,
            recipient,
            body,
            metadata,
            subject,
            template,
        } = request;

        let code =
            ProviderCode::new(provider).map_err(|_| DeliveryDomainError::EmptyProviderCode)?;
        let draft = MessageDraft::new(code.clone(), recipient, body)?.with_metadata(metadata);
        self.resolver.require_active(&code).await?;

        let mut message = Message::new(draft, &*self.clock);
        self.messages.create(&message).await?;
        Span::current().record("message_id", message.id().as_str());
        info!("message accepted for delivery");

        let email = EmailOptions {
            subject: subject.as_deref(),
            template: template.as_ref(),
        };
        let mut last_error = String::new();
        for (number, delay) in self.policy.schedule() {
            if !delay.is_zero() {
                debug!(attempt = number.value(), ?delay, "waiting before retry");
                self.sleeper.sleep(delay).await;
            }
            let attempt = self.dispatch(&message, number, email).await;
            self.record(&attempt).await?;

            if attempt.outcome() == AttemptOutcome::Success {
                message
                    .mark_delivered(number.value(), &*self.clock)
                    .map_err(DeliveryServiceError::Lifecycle)?;
                self.messages.update(&message).await?;
                info!(attempts = number.value(), "message delivered");
                return Ok(DeliveryReport::Delivered {
                    message_id: message.id().clone(),
                    provider: code,
                    attempts: number.value(),
                });
            }
            last_error = attempt.error_message().unwrap_or_default().to_owned();
        }

        let attempts = self.policy.max_attempts();
        message
            .mark_failed(attempts, last_error.clone(), &*self.clock)
            .map_err(DeliveryServiceError::Lifecycle)?;
        self.messages.update(&message).await?;
        warn!(attempts, last_error = %last_error, "message delivery failed");
        Ok(DeliveryReport::Failed {
            message_id: message.id().clone(),
            provider: code,
            attempts,
            last_error,
        })
    }

    async fn dispatch(
        &self,
        message: &Message,
        number: AttemptNumber,
        email: EmailOptions<'_>,
    ) -> DeliveryAttempt {
        let started = Instant::now();
        let observed = match self.resolver.resolve(message.provider()).await {
            Ok(provider) => {
                let (route, channel) = self.channels.select(provider.kind());
                debug!(attempt = number.value(), %route, "dispatching");
                let response = channel
                    .send(&ChannelRequest {
                        provider: &provider,
                        recipient: message.recipient(),
                        body: message.body(),
                        subject: email.subject,
                        template: email.template,
                    })
                    .await;
                Observation::from_response(response)
            }
            Err(err) => {
                warn!(attempt = number.value(), error = %err, "provider lookup failed mid-delivery");
                Observation::unreachable(&err)
            }
        };
        let duration = started.elapsed();
        debug!(
            attempt = number.value(),
            outcome = %observed.outcome,
            status = observed.response_code,
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "attempt finished"
        );

        DeliveryAttempt::new(AttemptParams {
            message_id: message.id().clone(),
            attempt_number: number,
            provider: message.provider().clone(),
            outcome: observed.outcome,
            response_code: observed.response_code,
            response_body: observed.response_body,
            error_message: observed.error_message,
            duration,
            attempted_at: self.clock.utc(),
        })
    }

    async fn record(&self, attempt: &DeliveryAttempt) -> DeliveryServiceResult<()> {
        let Err(err) = self.attempts.append(attempt).await else {
            return Ok(());
        };
        match self.durability {
            AttemptLogDurability::BestEffort => {
                warn!(
                    attempt = attempt.attempt_number().value(),
                    error = %err,
                    "attempt record not written"
                );
                Ok(())
            }
            AttemptLogDurability::Required => Err(err.into()),
        }
    }
}

/// What a single dispatch produced, before it becomes an attempt record.
struct Observation {
    outcome: AttemptOutcome,
    response_code: Option<u16>,
    response_body: String,
    error_message: Option<String>,
}

impl Observation {
    fn from_response(response: ChannelResponse) -> Self {
        let status = response.status_code();
        if response.is_accepted() {
            Self {
                outcome: AttemptOutcome::Success,
                response_code: Some(status),
                response_body: response.into_body(),
                error_message: None,
            }
        } else {
            Self {
                outcome: AttemptOutcome::Failed,
                response_code: Some(status),
                response_body: response.into_body(),
                error_message: Some(format!("Provider returned status {status}")),
            }
        }
    }

    fn unreachable(err: &ProviderResolutionError) -> Self {
        Self {
            outcome: AttemptOutcome::Error,
            response_code: None,
            response_body: String::new(),
            error_message: Some(err.to_string()),
        }
    }
}
