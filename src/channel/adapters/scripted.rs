//! Deterministic channel that replays queued responses.

use crate::channel::{
    domain::{ChannelRequest, ChannelResponse},
    ports::ChannelAdapter,
};
use crate::provider::domain::{CredentialBundle, ProviderCode, ProviderKind};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A call observed by [`ScriptedChannel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Provider code of the resolved provider.
    pub provider: ProviderCode,
    /// Provider type at dispatch time.
    pub kind: ProviderKind,
    /// Credentials at dispatch time.
    pub credentials: CredentialBundle,
    /// Recipient as handed to the channel.
    pub recipient: String,
    /// Message body.
    pub body: String,
    /// Email subject, when supplied.
    pub subject: Option<String>,
    /// Template name, when supplied.
    pub template_name: Option<String>,
}

#[derive(Debug)]
struct ScriptState {
    queued: VecDeque<ChannelResponse>,
    fallback: ChannelResponse,
    calls: Vec<RecordedCall>,
}

/// Channel that returns queued responses in order, then a fallback.
///
/// Every call is recorded, so tests can inspect what each attempt saw.
#[derive(Debug, Clone)]
pub struct ScriptedChannel {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedChannel {
    /// Creates a channel that answers every call with `fallback`.
    #[must_use]
    pub fn always(fallback: ChannelResponse) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                queued: VecDeque::new(),
                fallback,
                calls: Vec::new(),
            })),
        }
    }

    /// Creates a channel that replays `responses`, then rejects with a
    /// synthetic failure.
    #[must_use]
    pub fn sequence(responses: impl IntoIterator<Item = ChannelResponse>) -> Self {
        let channel = Self::always(ChannelResponse::rejected(
            ChannelResponse::SYNTHETIC_FAILURE_STATUS,
            r#"{"error":"script exhausted"}"#,
        ));
        if let Ok(mut state) = channel.state.lock() {
            state.queued.extend(responses);
        }
        channel
    }

    /// Returns the calls observed so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state
            .lock()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChannelAdapter for ScriptedChannel {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn send(&self, request: &ChannelRequest<'_>) -> ChannelResponse {
        let Ok(mut state) = self.state.lock() else {
            return ChannelResponse::rejected(
                ChannelResponse::SYNTHETIC_FAILURE_STATUS,
                r#"{"error":"script unavailable"}"#,
            );
        };
        state.calls.push(RecordedCall {
            provider: request.provider.code().clone(),
            kind: request.provider.kind().clone(),
            credentials: request.provider.credentials().clone(),
            recipient: request.recipient.to_owned(),
            body: request.body.to_owned(),
            subject: request.subject.map(str::to_owned),
            template_name: request.template.map(|template| template.name().to_owned()),
        });
        let fallback = state.fallback.clone();
        state.queued.pop_front().unwrap_or(fallback)
    }
}
