//! Configuration loading with Figment.
//!
//! Merge order, later overriding earlier: compiled defaults, the TOML file,
//! then `HERALD_*` environment variables.

use super::{HeraldConfig, validate_config};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::Path;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "herald.toml";
const ENV_PREFIX: &str = "HERALD_";
const SECTIONS: [&str; 6] = [
    "attempt_log",
    "retry",
    "chat",
    "email",
    "simulated",
    "database",
];

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error(transparent)]
    Load(#[from] Box<figment::Error>),

    /// The merged configuration failed semantic checks.
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Loads `./herald.toml` (if present) with environment overrides.
///
/// # Errors
///
/// Returns [`ConfigError`] when a source is malformed or validation fails.
pub fn load_config() -> Result<HeraldConfig, ConfigError> {
    extract(
        Figment::new()
            .merge(Serialized::defaults(HeraldConfig::default()))
            .merge(Toml::file(DEFAULT_CONFIG_FILE))
            .merge(env_provider()),
    )
}

/// Loads configuration from a TOML string without environment overrides.
///
/// # Errors
///
/// Returns [`ConfigError`] when the TOML is malformed or validation fails.
pub fn load_config_from_str(toml_content: &str) -> Result<HeraldConfig, ConfigError> {
    extract(
        Figment::new()
            .merge(Serialized::defaults(HeraldConfig::default()))
            .merge(Toml::string(toml_content)),
    )
}

/// Loads configuration from an explicit file with environment overrides.
///
/// # Errors
///
/// Returns [`ConfigError`] when a source is malformed or validation fails.
pub fn load_config_from_path(path: &Path) -> Result<HeraldConfig, ConfigError> {
    extract(
        Figment::new()
            .merge(Serialized::defaults(HeraldConfig::default()))
            .merge(Toml::file(path))
            .merge(env_provider()),
    )
}

fn extract(figment: Figment) -> Result<HeraldConfig, ConfigError> {
    let config: HeraldConfig = figment.extract().map_err(Box::new)?;
    validate_config(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| section_key(key.as_str()).into())
}

/// Maps a prefix-stripped `<section>_<field>` variable name onto
/// `section.field`.
///
/// Section names are matched explicitly because field names contain
/// underscores too.
pub(super) fn section_key(name: &str) -> String {
    let raw = name.to_ascii_lowercase();
    SECTIONS
        .iter()
        .find_map(|section| {
            raw.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|field| format!("{section}.{field}"))
        })
        .unwrap_or(raw)
}
