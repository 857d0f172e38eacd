//! Domain model for provider configuration.
//!
//! A provider couples a unique code with a display name, a channel type, an
//! active flag, and an opaque credential bundle whose shape depends on the
//! type.

mod code;
mod credentials;
mod error;
mod kind;
mod provider;

pub use code::ProviderCode;
pub use credentials::{ChatCredentials, CredentialBundle, EmailCredentials};
pub use error::ProviderDomainError;
pub use kind::{ChatSubtype, ProviderKind};
pub use provider::Provider;
