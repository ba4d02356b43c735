//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Support loading from `.env`, environment variables, and direct builder methods.
//! - Validate and build the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods applied after `from_env()` take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_REFRESH_THRESHOLD_SECS, DEFAULT_TIMEOUT_SECS, MAX_REFRESH_THRESHOLD_SECS,
    MAX_TIMEOUT_SECS,
};
use crate::paths::default_session_path;
use crate::types::{Config, ConnectionConfig, LoginConfig};

/// Configuration loader that builds config from the environment and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    email: Option<String>,
    password: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    refresh_threshold: Option<Duration>,
    session_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the login email.
    pub fn with_email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    /// Set the login password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the refresh threshold.
    pub fn with_refresh_threshold(mut self, threshold: Duration) -> Self {
        self.refresh_threshold = Some(threshold);
        self
    }

    /// Override the credential store location.
    pub fn with_session_path(mut self, path: PathBuf) -> Self {
        self.session_path = Some(path);
        self
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_refresh_threshold(&mut self, threshold: Option<Duration>) {
        self.refresh_threshold = threshold;
    }

    pub(crate) fn set_session_path(&mut self, path: Option<PathBuf>) {
        self.session_path = path;
    }

    /// The explicitly configured session path, if any.
    pub fn session_path(&self) -> Option<&PathBuf> {
        self.session_path.as_ref()
    }

    /// Validate and normalize a base URL.
    ///
    /// Trailing slashes are removed so endpoint paths can be appended directly.
    fn normalize_base_url(url: String) -> Result<String, ConfigError> {
        let parsed = url::Url::parse(&url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: url.clone(),
            message: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url,
                message: "scheme must be http or https".to_string(),
            });
        }

        Ok(url.trim_end_matches('/').to_string())
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = Self::normalize_base_url(base_url)?;

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        if timeout.is_zero() || timeout.as_secs() > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "must be between 1 and {} seconds (got {})",
                    MAX_TIMEOUT_SECS,
                    timeout.as_secs()
                ),
            });
        }

        let refresh_threshold = self
            .refresh_threshold
            .unwrap_or(Duration::from_secs(DEFAULT_REFRESH_THRESHOLD_SECS));
        if refresh_threshold.as_secs() > MAX_REFRESH_THRESHOLD_SECS {
            return Err(ConfigError::InvalidRefreshThreshold {
                message: format!(
                    "must be at most {} seconds (got {})",
                    MAX_REFRESH_THRESHOLD_SECS,
                    refresh_threshold.as_secs()
                ),
            });
        }

        let session_path = match self.session_path {
            Some(path) => path,
            None => default_session_path()
                .map_err(|e| ConfigError::DataDirUnavailable(e.to_string()))?,
        };

        tracing::debug!(
            base_url = %base_url,
            session_path = %session_path.display(),
            "Configuration built"
        );

        Ok(Config {
            connection: ConnectionConfig {
                base_url,
                skip_verify: self.skip_verify.unwrap_or(false),
                timeout,
                refresh_threshold,
            },
            session_path,
            login: LoginConfig {
                email: self.email,
                password: self.password,
            },
        })
    }
}
