//! Chat relay channel.

use crate::channel::{
    domain::{ChannelError, ChannelRequest, ChannelResponse},
    ports::ChannelAdapter,
    settings::ChatApiSettings,
};
use crate::provider::domain::{ChatCredentials, ProviderKind};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Status value the relay embeds in its payload once a message is handed over.
const DELIVERY_CONFIRMED: &str = "done";

#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    recipient: &'a str,
    body: &'a str,
}

/// Channel for chat-relay providers (`WhatsApp`, Telegram, MAX, generic).
#[derive(Debug, Clone)]
pub struct ChatApiChannel {
    client: reqwest::Client,
    settings: ChatApiSettings,
}

impl ChatApiChannel {
    /// Creates a chat channel.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(settings: ChatApiSettings) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ChannelError::Transport(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint_for(&self, kind: &ProviderKind) -> &str {
        match kind {
            ProviderKind::Chat(subtype) => self.settings.endpoint_for(subtype.as_str()),
            ProviderKind::SignedEmail | ProviderKind::Unintegrated(_) => {
                &self.settings.default_endpoint
            }
        }
    }

    async fn deliver(&self, request: &ChannelRequest<'_>) -> Result<ChannelResponse, ChannelError> {
        let credentials = ChatCredentials::from_bundle(request.provider.credentials())?;
        let endpoint = self.endpoint_for(request.provider.kind());
        let recipient = normalize_recipient(request.recipient);
        let timeout = self.settings.timeout();

        debug!(
            provider = %request.provider.code(),
            kind = %request.provider.kind(),
            endpoint,
            "sending chat message"
        );

        let response = self
            .client
            .post(endpoint)
            .query(&[("profile_id", credentials.profile_id())])
            .header(AUTHORIZATION, credentials.token())
            .json(&ChatPayload {
                recipient: &recipient,
                body: request.body,
            })
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| ChannelError::from_http(&err, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ChannelError::from_http(&err, timeout))?;
        debug!(status = status.as_u16(), "chat relay responded");

        if status != StatusCode::OK {
            return Ok(ChannelResponse::rejected(status.as_u16(), body));
        }
        if is_delivery_confirmed(&body) {
            Ok(ChannelResponse::accepted(status.as_u16(), body))
        } else {
            Ok(ChannelResponse::rejected(
                ChannelResponse::SYNTHETIC_FAILURE_STATUS,
                body,
            ))
        }
    }
}

#[async_trait]
impl ChannelAdapter for ChatApiChannel {
    fn name(&self) -> &'static str {
        "chat_api"
    }

    async fn send(&self, request: &ChannelRequest<'_>) -> ChannelResponse {
        self.deliver(request).await.unwrap_or_else(|err| {
            warn!(provider = %request.provider.code(), error = %err, "chat send failed");
            ChannelResponse::from_error(&err)
        })
    }
}

/// Strips `+`, `-`, and spaces from a phone-style recipient.
#[must_use]
pub fn normalize_recipient(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !matches!(ch, '+' | '-' | ' '))
        .collect()
}

fn is_delivery_confirmed(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|payload| payload.get("status"))
        .and_then(Value::as_str)
        .is_some_and(|status| status == DELIVERY_CONFIRMED)
}
