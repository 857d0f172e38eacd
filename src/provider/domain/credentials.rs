//! Credential bundles and their typed views.

use super::ProviderDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque, type-specific credential bundle stored with a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialBundle(Map<String, Value>);

impl CredentialBundle {
    /// Creates a bundle from a JSON object.
    #[must_use]
    pub const fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    /// Creates a bundle from a JSON value; non-object values yield an empty
    /// bundle.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self(values),
            _ => Self::default(),
        }
    }

    /// Adds or replaces a string entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Returns the bundle as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Returns `true` when the bundle has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first non-blank string stored under any of `keys`.
    fn lookup(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(str::to_owned)
    }

    fn require(
        &self,
        channel: &'static str,
        field: &'static str,
        legacy: &str,
    ) -> Result<String, ProviderDomainError> {
        self.lookup(&[field, legacy])
            .ok_or(ProviderDomainError::MissingCredential { channel, field })
    }
}

/// Credentials for the token-authenticated chat relay.
#[derive(Clone, PartialEq, Eq)]
pub struct ChatCredentials {
    token: String,
    profile_id: String,
}

impl ChatCredentials {
    const CHANNEL: &'static str = "chat";

    /// Extracts chat credentials from a bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError::MissingCredential`] when the token or
    /// profile id is absent.
    pub fn from_bundle(bundle: &CredentialBundle) -> Result<Self, ProviderDomainError> {
        Ok(Self {
            token: bundle.require(Self::CHANNEL, "token", "wappi_token")?,
            profile_id: bundle.require(Self::CHANNEL, "profile_id", "wappi_profile_id")?,
        })
    }

    /// Returns the API token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the sender profile identifier.
    #[must_use]
    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }
}

impl std::fmt::Debug for ChatCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCredentials")
            .field("token", &"<redacted>")
            .field("profile_id", &self.profile_id)
            .finish()
    }
}

/// Credentials for the signed transactional email API.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailCredentials {
    access_key: String,
    secret_key: String,
    from_email: String,
}

impl EmailCredentials {
    const CHANNEL: &'static str = "email";

    /// Creates email credentials from their parts.
    #[must_use]
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        from_email: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            from_email: from_email.into(),
        }
    }

    /// Extracts email credentials from a bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError::MissingCredential`] when the access
    /// key, secret key, or sender address is absent.
    pub fn from_bundle(bundle: &CredentialBundle) -> Result<Self, ProviderDomainError> {
        Ok(Self {
            access_key: bundle.require(Self::CHANNEL, "access_key", "postbox_access_key")?,
            secret_key: bundle.require(Self::CHANNEL, "secret_key", "postbox_secret_key")?,
            from_email: bundle.require(Self::CHANNEL, "from_email", "postbox_from_email")?,
        })
    }

    /// Returns the access key identifier.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Returns the secret signing key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Returns the sender address.
    #[must_use]
    pub fn from_email(&self) -> &str {
        &self.from_email
    }
}

impl std::fmt::Debug for EmailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("from_email", &self.from_email)
            .finish()
    }
}
