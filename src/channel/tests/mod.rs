//! Unit tests for delivery channels.


use crate::provider::domain::{CredentialBundle, Provider, ProviderCode, ProviderKind};

/// Builds an active provider of the given raw type.
fn provider(code: &str, provider_type: &str, credentials: CredentialBundle) -> Provider {
    Provider::new(
        ProviderCode::new(code).expect("valid provider code"),
        code,
        ProviderKind::from_type(Some(provider_type)),
    )
    .expect("valid provider")
    .with_credentials(credentials)
}
