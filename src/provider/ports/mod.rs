//! Port contracts for provider configuration lookup.

pub mod directory;

pub use directory::{ProviderDirectory, ProviderDirectoryError, ProviderDirectoryResult};

#[cfg(test)]
pub use directory::MockProviderDirectory;
