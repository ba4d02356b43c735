//! Configuration types for maintdesk.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_REFRESH_THRESHOLD_SECS, DEFAULT_TIMEOUT_SECS};

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for the maintenance API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the API (e.g., https://maint.example.com/api)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Window before access-token expiry in which a 401 triggers a refresh
    #[serde(with = "duration_seconds")]
    pub refresh_threshold: Duration,
}

impl ConnectionConfig {
    /// Connection settings for `base_url` with every other field defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            refresh_threshold: Duration::from_secs(DEFAULT_REFRESH_THRESHOLD_SECS),
        }
    }
}

/// Credentials used by the `login` flow.
///
/// Only the password is secret; the email is shown in prompts and logs.
#[derive(Debug, Clone, Default)]
pub struct LoginConfig {
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Location of the persisted credential store
    pub session_path: PathBuf,
    /// Login credentials, if any were supplied
    pub login: LoginConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_config_defaults() {
        let connection = ConnectionConfig::with_base_url("https://maint.example.com");
        assert_eq!(connection.base_url, "https://maint.example.com");
        assert!(!connection.skip_verify);
        assert_eq!(connection.timeout, Duration::from_secs(30));
        assert_eq!(connection.refresh_threshold, Duration::from_secs(60));
    }

    #[test]
    fn test_connection_config_serializes_durations_as_seconds() {
        let connection = ConnectionConfig::with_base_url("https://maint.example.com");
        let json = serde_json::to_value(&connection).unwrap();
        assert_eq!(json["timeout"], 30);
        assert_eq!(json["refresh_threshold"], 60);

        let back: ConnectionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_login_password_not_exposed_in_debug() {
        let login = LoginConfig {
            email: Some("tech@example.com".to_string()),
            password: Some(SecretString::new("hunter2-secret".to_string().into())),
        };
        let debug_output = format!("{:?}", login);
        assert!(!debug_output.contains("hunter2-secret"));
        assert!(debug_output.contains("tech@example.com"));
    }
}
