//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `MAINTDESK_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric or boolean values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(var: &str, value: &str, message: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        message: message.to_string(),
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("MAINTDESK_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(email) = env_var_or_none("MAINTDESK_EMAIL") {
        loader.set_email(Some(email));
    }
    if let Some(password) = env_var_or_none("MAINTDESK_PASSWORD") {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(skip) = env_var_or_none("MAINTDESK_SKIP_VERIFY") {
        loader.set_skip_verify(Some(parse_env(
            "MAINTDESK_SKIP_VERIFY",
            &skip,
            "must be true or false",
        )?));
    }
    if let Some(timeout) = env_var_or_none("MAINTDESK_TIMEOUT") {
        let secs: u64 = parse_env("MAINTDESK_TIMEOUT", &timeout, "must be a number")?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(threshold) = env_var_or_none("MAINTDESK_REFRESH_THRESHOLD") {
        let secs: u64 = parse_env(
            "MAINTDESK_REFRESH_THRESHOLD",
            &threshold,
            "must be a number of seconds",
        )?;
        loader.set_refresh_threshold(Some(Duration::from_secs(secs)));
    }
    // Only fall back to the environment when no explicit path was given.
    if loader.session_path().is_none()
        && let Some(path) = env_var_or_none("MAINTDESK_SESSION_PATH")
    {
        loader.set_session_path(Some(PathBuf::from(path)));
    }

    Ok(())
}
