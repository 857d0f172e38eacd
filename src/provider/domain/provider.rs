//! Provider read model.

use super::{CredentialBundle, ProviderCode, ProviderDomainError, ProviderKind};

/// A configured delivery provider as seen by the delivery pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    code: ProviderCode,
    display_name: String,
    kind: ProviderKind,
    active: bool,
    credentials: CredentialBundle,
}

impl Provider {
    /// Creates an active provider with an empty credential bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError::EmptyDisplayName`] when the display
    /// name is blank.
    pub fn new(
        code: ProviderCode,
        display_name: impl Into<String>,
        kind: ProviderKind,
    ) -> Result<Self, ProviderDomainError> {
        let raw = display_name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProviderDomainError::EmptyDisplayName);
        }
        Ok(Self {
            code,
            display_name: trimmed.to_owned(),
            kind,
            active: true,
            credentials: CredentialBundle::default(),
        })
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets the credential bundle.
    #[must_use]
    pub fn with_credentials(mut self, credentials: CredentialBundle) -> Self {
        self.credentials = credentials;
        self
    }

    /// Returns the provider code.
    #[must_use]
    pub const fn code(&self) -> &ProviderCode {
        &self.code
    }

    /// Returns the human-readable provider name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the channel type.
    #[must_use]
    pub const fn kind(&self) -> &ProviderKind {
        &self.kind
    }

    /// Returns whether the provider accepts deliveries.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the credential bundle.
    #[must_use]
    pub const fn credentials(&self) -> &CredentialBundle {
        &self.credentials
    }
}
