//! Channel settings, loaded as part of the Herald configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

const CHAT_API_BASE: &str = "https://wappi.pro";

/// Settings for every channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    /// Chat relay settings.
    pub chat: ChatApiSettings,
    /// Signed email settings.
    pub email: SignedEmailSettings,
    /// Simulated channel settings.
    pub simulated: SimulatedSettings,
}

/// Chat relay endpoint table and timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatApiSettings {
    /// Endpoint used for subtypes missing from `endpoints`.
    pub default_endpoint: String,
    /// Endpoint per chat subtype.
    pub endpoints: BTreeMap<String, String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ChatApiSettings {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the endpoint for a subtype, falling back to the default.
    #[must_use]
    pub fn endpoint_for(&self, subtype: &str) -> &str {
        self.endpoints
            .get(subtype)
            .map_or(self.default_endpoint.as_str(), String::as_str)
    }
}

impl Default for ChatApiSettings {
    fn default() -> Self {
        let endpoints = [
            ("max", "/maxapi/sync/message/send"),
            ("telegram_bot", "/tapi/sync/message/send"),
            ("whatsapp_business", "/api/sync/message/send"),
            ("wappi", "/api/sync/message/send"),
        ]
        .into_iter()
        .map(|(subtype, path)| (subtype.to_owned(), format!("{CHAT_API_BASE}{path}")))
        .collect();

        Self {
            default_endpoint: format!("{CHAT_API_BASE}/api/sync/message/send"),
            endpoints,
            timeout_secs: 10,
        }
    }
}

/// Signed email endpoint, signing scope, and defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignedEmailSettings {
    /// Full URL of the send-email resource; host and path are signed.
    pub endpoint: String,
    /// Signing region.
    pub region: String,
    /// Signing service name.
    pub service: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Subject used when a request carries none.
    pub default_subject: String,
}

impl SignedEmailSettings {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SignedEmailSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://postbox.cloud.yandex.net/v2/email/outbound-emails".to_owned(),
            region: "ru-central1".to_owned(),
            service: "ses".to_owned(),
            timeout_secs: 30,
            default_subject: "Notification".to_owned(),
        }
    }
}

/// Simulated channel latency and outcome distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedSettings {
    /// Artificial latency per call in milliseconds.
    pub delay_ms: u64,
    /// Probability of a successful outcome, in `[0, 1]`.
    pub success_rate: f64,
    /// Seed for reproducible outcomes; drawn from the OS when unset.
    pub seed: Option<u64>,
}

impl SimulatedSettings {
    /// Returns the artificial latency.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for SimulatedSettings {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            success_rate: 0.8,
            seed: None,
        }
    }
}
