//! Channel send request.

use crate::provider::domain::Provider;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to a server-side email template and its substitution data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    name: String,
    data: Map<String, Value>,
}

impl EmailTemplate {
    /// Creates a template reference with no substitution data.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Map::new(),
        }
    }

    /// Sets the substitution data.
    #[must_use]
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    /// Returns the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the substitution data.
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

/// One send request handed to a channel.
///
/// The provider is the record resolved for this attempt, so credentials and
/// type reflect the configuration at dispatch time.
#[derive(Debug, Clone, Copy)]
pub struct ChannelRequest<'a> {
    /// Provider resolved for this attempt.
    pub provider: &'a Provider,
    /// Recipient address as submitted.
    pub recipient: &'a str,
    /// Message body.
    pub body: &'a str,
    /// Email subject, when supplied.
    pub subject: Option<&'a str>,
    /// Email template, when supplied.
    pub template: Option<&'a EmailTemplate>,
}
