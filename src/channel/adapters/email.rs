//! Signed transactional email channel.

use super::signing::{self, SigningTarget};
use crate::channel::{
    domain::{ChannelError, ChannelRequest, ChannelResponse, EmailTemplate},
    ports::ChannelAdapter,
    settings::SignedEmailSettings,
};
use crate::provider::domain::EmailCredentials;
use async_trait::async_trait;
use mockable::Clock;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

const CHARSET: &str = "UTF-8";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OutboundEmail<'a> {
    from_email_address: &'a str,
    destination: Destination<'a>,
    content: EmailContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Destination<'a> {
    to_addresses: [&'a str; 1],
}

#[derive(Debug, Serialize)]
enum EmailContent<'a> {
    Simple(SimpleContent<'a>),
    Template(TemplateContent<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SimpleContent<'a> {
    subject: CharsetText<'a>,
    body: SimpleBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SimpleBody<'a> {
    text: CharsetText<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CharsetText<'a> {
    data: &'a str,
    charset: &'static str,
}

impl<'a> CharsetText<'a> {
    const fn utf8(data: &'a str) -> Self {
        Self {
            data,
            charset: CHARSET,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TemplateContent<'a> {
    template_name: &'a str,
    /// The API expects the substitution map as a JSON-encoded string.
    template_data: String,
}

/// Builds the send-email payload.
///
/// A template reference selects the template shape; otherwise the subject and
/// body are sent as direct text content.
///
/// # Errors
///
/// Returns [`ChannelError::Encoding`] if the template data cannot be encoded.
pub fn build_email_payload(
    from_email: &str,
    recipient: &str,
    subject: &str,
    body: &str,
    template: Option<&EmailTemplate>,
) -> Result<Value, ChannelError> {
    let content = match template {
        Some(template) => EmailContent::Template(TemplateContent {
            template_name: template.name(),
            template_data: serde_json::to_string(template.data())
                .map_err(|err| ChannelError::Encoding(err.to_string()))?,
        }),
        None => EmailContent::Simple(SimpleContent {
            subject: CharsetText::utf8(subject),
            body: SimpleBody {
                text: CharsetText::utf8(body),
            },
        }),
    };
    let email = OutboundEmail {
        from_email_address: from_email,
        destination: Destination {
            to_addresses: [recipient],
        },
        content,
    };
    serde_json::to_value(&email).map_err(|err| ChannelError::Encoding(err.to_string()))
}

/// Channel for the signed transactional email API.
#[derive(Clone)]
pub struct SignedEmailChannel {
    client: reqwest::Client,
    settings: SignedEmailSettings,
    endpoint: Url,
    target: SigningTarget,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl std::fmt::Debug for SignedEmailChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedEmailChannel")
            .field("endpoint", &self.endpoint.as_str())
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl SignedEmailChannel {
    /// Creates an email channel.
    ///
    /// The signed host and path are taken from the configured endpoint so the
    /// signature always covers the request actually sent.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidEndpoint`] when the endpoint is not an
    /// absolute URL with a host, or [`ChannelError::Transport`] when the HTTP
    /// client cannot be built.
    pub fn new(
        settings: SignedEmailSettings,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Result<Self, ChannelError> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|_| ChannelError::InvalidEndpoint(settings.endpoint.clone()))?;
        let host = endpoint
            .host_str()
            .ok_or_else(|| ChannelError::InvalidEndpoint(settings.endpoint.clone()))?;
        let authority = match endpoint.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };
        let target = SigningTarget::post(
            authority,
            endpoint.path(),
            settings.region.as_str(),
            settings.service.as_str(),
        );
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ChannelError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            settings,
            endpoint,
            target,
            clock,
        })
    }

    /// Returns the signing target derived from the endpoint.
    #[must_use]
    pub const fn signing_target(&self) -> &SigningTarget {
        &self.target
    }

    async fn deliver(&self, request: &ChannelRequest<'_>) -> Result<ChannelResponse, ChannelError> {
        let credentials = EmailCredentials::from_bundle(request.provider.credentials())?;
        let subject = request
            .subject
            .unwrap_or(self.settings.default_subject.as_str());
        let payload = build_email_payload(
            credentials.from_email(),
            request.recipient,
            subject,
            request.body,
            request.template,
        )?;
        let body =
            serde_json::to_vec(&payload).map_err(|err| ChannelError::Encoding(err.to_string()))?;
        let signature = signing::sign_request(&self.target, &credentials, &body, self.clock.utc())
            .map_err(|err| ChannelError::Encoding(err.to_string()))?;
        let timeout = self.settings.timeout();

        debug!(
            provider = %request.provider.code(),
            template = request.template.map(EmailTemplate::name),
            "sending signed email"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, signing::CONTENT_TYPE)
            .header(signing::DATE_HEADER, signature.timestamp())
            .header(AUTHORIZATION, signature.authorization())
            .body(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| ChannelError::from_http(&err, timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ChannelError::from_http(&err, timeout))?;
        debug!(status = status.as_u16(), "email API responded");

        if status == StatusCode::OK {
            Ok(ChannelResponse::accepted(status.as_u16(), text))
        } else {
            Ok(ChannelResponse::rejected(status.as_u16(), text))
        }
    }
}

#[async_trait]
impl ChannelAdapter for SignedEmailChannel {
    fn name(&self) -> &'static str {
        "signed_email"
    }

    async fn send(&self, request: &ChannelRequest<'_>) -> ChannelResponse {
        self.deliver(request).await.unwrap_or_else(|err| {
            warn!(provider = %request.provider.code(), error = %err, "email send failed");
            ChannelResponse::from_error(&err)
        })
    }
}
