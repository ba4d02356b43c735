//! Client builder for constructing [`MaintClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating and normalizing the base URL
//! - Configuring the underlying HTTP client (timeouts, redirects, TLS verification)
//! - Wiring the credential store, navigator and metrics into the session manager
//!
//! # Invariants
//! - `base_url` is required and is always stored without trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::sync::Arc;
use std::time::Duration;

use maintdesk_config::Config;
use maintdesk_config::constants::{
    DEFAULT_MAX_REDIRECTS, DEFAULT_REFRESH_THRESHOLD_SECS, DEFAULT_TIMEOUT_SECS,
};

use crate::auth::{Navigator, SessionManager};
use crate::client::MaintClient;
use crate::credentials::{CredentialStore, FileCredentialStore};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`MaintClient`].
pub struct MaintClientBuilder {
    base_url: Option<String>,
    skip_verify: bool,
    timeout: Duration,
    refresh_threshold: Duration,
    store: Option<Arc<dyn CredentialStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    metrics: Option<MetricsCollector>,
}

impl Default for MaintClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            refresh_threshold: Duration::from_secs(DEFAULT_REFRESH_THRESHOLD_SECS),
            store: None,
            navigator: None,
            metrics: None,
        }
    }
}

impl MaintClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL, e.g. `https://maint.example.com/api`.
    ///
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Accept invalid TLS certificates.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how close to expiry a token must be for a 401 to trigger a refresh.
    /// Default is 60 seconds.
    pub fn refresh_threshold(mut self, threshold: Duration) -> Self {
        self.refresh_threshold = threshold;
        self
    }

    /// Set the credential store. Defaults to an in-memory store.
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the navigator notified on teardown.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Record request and session metrics.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Apply connection settings from configuration and persist credentials
    /// to the configured session file.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.refresh_threshold = config.connection.refresh_threshold;
        self.store = Some(Arc::new(FileCredentialStore::new(&config.session_path)));
        self
    }

    fn normalize_base_url(url: String) -> Result<String> {
        let parsed = reqwest::Url::parse(&url)
            .map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{url}: scheme must be http or https"
            )));
        }
        Ok(url.trim_end_matches('/').to_string())
    }

    /// Build the [`MaintClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or invalid.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<MaintClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url)?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        let mut session = SessionManager::builder(http, base_url)
            .refresh_threshold(self.refresh_threshold)
            .metrics(self.metrics);
        if let Some(store) = self.store {
            session = session.store(store);
        }
        if let Some(navigator) = self.navigator {
            session = session.navigator(navigator);
        }

        Ok(MaintClient::from_session(session.build()))
    }
}
