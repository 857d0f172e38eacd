//! Application services for provider configuration lookup.

mod resolver;

pub use resolver::{ProviderConfigResolver, ProviderResolutionError};
