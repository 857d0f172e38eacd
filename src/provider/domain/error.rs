//! Error types for provider domain validation.

use thiserror::Error;

/// Errors returned while constructing provider domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderDomainError {
    /// The provider code is empty after trimming.
    #[error("provider code must not be empty")]
    EmptyProviderCode,

    /// The provider display name is empty after trimming.
    #[error("provider display name must not be empty")]
    EmptyDisplayName,

    /// A credential bundle is missing a field required by its channel.
    #[error("{channel} credentials not configured: missing '{field}'")]
    MissingCredential {
        /// Channel that needed the credential.
        channel: &'static str,
        /// Field that was absent or blank.
        field: &'static str,
    },
}
