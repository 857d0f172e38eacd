//! Provider channel types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chat relay subtypes served by the token-authenticated chat API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSubtype {
    /// `WhatsApp` Business numbers.
    WhatsappBusiness,
    /// Telegram bot accounts.
    TelegramBot,
    /// Generic relay profile.
    Wappi,
    /// MAX messenger accounts.
    Max,
}

impl ChatSubtype {
    /// Every chat subtype, in storage order.
    pub const ALL: [Self; 4] = [
        Self::WhatsappBusiness,
        Self::TelegramBot,
        Self::Wappi,
        Self::Max,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WhatsappBusiness => "whatsapp_business",
            Self::TelegramBot => "telegram_bot",
            Self::Wappi => "wappi",
            Self::Max => "max",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|subtype| subtype.as_str() == value)
    }
}

impl fmt::Display for ChatSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed classification of a provider's `provider_type` column.
///
/// Parsing never fails: anything that is not a chat subtype or the signed
/// email type is [`ProviderKind::Unintegrated`] and is delivered through the
/// simulated channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Token-authenticated chat relay.
    Chat(ChatSubtype),
    /// Transactional email behind a signed API.
    SignedEmail,
    /// Any provider type without a real integration. Holds the raw type,
    /// which is empty when none was configured.
    Unintegrated(String),
}

impl ProviderKind {
    /// Storage value of the signed email provider type.
    pub const SIGNED_EMAIL_TYPE: &'static str = "yandex_postbox";

    /// Classifies an optional raw provider type.
    ///
    /// Matching is exact: a differently cased or padded spelling of a known
    /// type is unintegrated.
    #[must_use]
    pub fn from_type(raw: Option<&str>) -> Self {
        let Some(value) = raw else {
            return Self::Unintegrated(String::new());
        };
        if value == Self::SIGNED_EMAIL_TYPE {
            return Self::SignedEmail;
        }
        ChatSubtype::parse(value).map_or_else(|| Self::Unintegrated(value.to_owned()), Self::Chat)
    }

    /// Returns the storage representation, or `None` for an unset type.
    #[must_use]
    pub fn as_type(&self) -> Option<&str> {
        match self {
            Self::Chat(subtype) => Some(subtype.as_str()),
            Self::SignedEmail => Some(Self::SIGNED_EMAIL_TYPE),
            Self::Unintegrated(raw) if raw.is_empty() => None,
            Self::Unintegrated(raw) => Some(raw),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_type().unwrap_or("unset"))
    }
}
