//! Post-deserialization checks.

use super::HeraldConfig;
use crate::delivery::services::MAX_ATTEMPTS;
use reqwest::Url;

/// Validates a merged configuration, collecting every problem.
///
/// # Errors
///
/// Returns one message per violated constraint.
pub fn validate_config(config: &HeraldConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.retry.delays_secs.is_empty() {
        errors.push("retry.delays_secs must contain at least one attempt".to_owned());
    }
    let attempts = config.retry.delays_secs.len();
    if attempts > MAX_ATTEMPTS {
        errors.push(format!(
            "retry.delays_secs allows at most {MAX_ATTEMPTS} attempts, got {attempts}"
        ));
    }

    let rate = config.simulated.success_rate;
    if !(0.0..=1.0).contains(&rate) {
        errors.push(format!("simulated.success_rate must be within [0, 1], got {rate}"));
    }

    check_url(&mut errors, "chat.default_endpoint", &config.chat.default_endpoint);
    for (subtype, endpoint) in &config.chat.endpoints {
        check_url(&mut errors, &format!("chat.endpoints.{subtype}"), endpoint);
    }
    check_url(&mut errors, "email.endpoint", &config.email.endpoint);

    if config.chat.timeout_secs == 0 {
        errors.push("chat.timeout_secs must be positive".to_owned());
    }
    if config.email.timeout_secs == 0 {
        errors.push("email.timeout_secs must be positive".to_owned());
    }
    if config.database.max_connections == 0 {
        errors.push("database.max_connections must be positive".to_owned());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_url(errors: &mut Vec<String>, field: &str, value: &str) {
    let is_valid = Url::parse(value).is_ok_and(|url| url.has_host());
    if !is_valid {
        errors.push(format!("{field} `{value}` is not an absolute URL"));
    }
}
