//! Layered configuration for Herald.
//!
//! Values are merged from compiled defaults, a TOML file, and `HERALD_*`
//! environment variables, then checked for semantic errors that serde cannot
//! express.

mod loader;
mod model;
mod validation;

pub use loader::{ConfigError, load_config, load_config_from_path, load_config_from_str};
pub use model::{AttemptLogSettings, DatabaseSettings, HeraldConfig, RetrySettings};
pub use validation::validate_config;

#[cfg(test)]
mod tests;
