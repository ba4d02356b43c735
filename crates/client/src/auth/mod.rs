//! Authenticated session management.
//!
//! This module owns the per-session state shared by every request:
//! - [`decorator`]: attaches the stored bearer token to outgoing requests
//! - `refresh`: single-flight token refresh with a waiter queue
//! - `interceptor`: detects 401 responses and replays once with a new token
//! - [`teardown`]: clears credentials and moves to the entry point
//!
//! # What this module does NOT handle:
//! - Mapping final responses to typed results (see [`crate::endpoints`])
//! - Credential persistence formats (see [`crate::credentials`])

pub mod decorator;
mod interceptor;
mod refresh;
pub mod teardown;

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use maintdesk_config::constants::DEFAULT_REFRESH_THRESHOLD_SECS;
use secrecy::SecretString;
use tracing::info;

use crate::credentials::{CredentialStore, MemoryCredentialStore, SessionInfo, persist_bundle};
use crate::endpoints;
use crate::error::{ClientError, Result, StoreError};
use crate::metrics::MetricsCollector;

pub use decorator::decorate;
pub use refresh::is_refresh_due;
pub use teardown::{HeadlessNavigator, Navigator, TeardownReason};

use refresh::RefreshState;

/// State shared by every clone of a [`SessionManager`].
pub(crate) struct SessionInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) store: Arc<dyn CredentialStore>,
    pub(crate) navigator: Arc<dyn Navigator>,
    pub(crate) refresh_threshold: Duration,
    pub(crate) metrics: Option<MetricsCollector>,
    pub(crate) refresh: Mutex<RefreshState>,
}

/// Handle to one authenticated session.
///
/// Clones share the credential store, the navigator and the refresh state, so
/// concurrent requests from any clone coalesce into a single refresh.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.inner.base_url)
            .field("store", &self.inner.store)
            .field("navigator", &self.inner.navigator)
            .field("refresh_threshold", &self.inner.refresh_threshold)
            .field("refreshing", &self.is_refreshing())
            .finish()
    }
}

impl SessionManager {
    /// Start building a session manager around an HTTP client.
    pub fn builder(http: reqwest::Client, base_url: impl Into<String>) -> SessionManagerBuilder {
        SessionManagerBuilder {
            http,
            base_url: base_url.into(),
            store: None,
            navigator: None,
            refresh_threshold: Duration::from_secs(DEFAULT_REFRESH_THRESHOLD_SECS),
            metrics: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.store
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.inner.navigator
    }

    pub fn refresh_threshold(&self) -> Duration {
        self.inner.refresh_threshold
    }

    /// True while a refresh call is in flight.
    pub fn is_refreshing(&self) -> bool {
        RefreshState::lock(&self.inner.refresh).in_flight()
    }

    /// Typed view of the stored session.
    pub fn session_info(&self) -> std::result::Result<SessionInfo, StoreError> {
        SessionInfo::load(self.inner.store.as_ref())
    }

    /// Log in with email and password and persist the returned credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if the credentials are rejected.
    /// Login requests are exempt from teardown, so a rejected login leaves any
    /// existing session and the current location untouched.
    ///
    /// A 401 on the login call still goes through the refresh coordinator. If
    /// a previous session's refresh token is stored and due, it is refreshed
    /// and persisted before the login is replayed.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<SessionInfo> {
        let bundle = match endpoints::login(self, email, password).await {
            Ok(bundle) => bundle,
            Err(ClientError::SessionExpired { .. } | ClientError::Unauthorized { .. }) => {
                return Err(ClientError::AuthFailed(
                    "invalid email or password".to_string(),
                ));
            }
            Err(e) => return Err(e),
        };

        persist_bundle(self.inner.store.as_ref(), &bundle)?;
        info!(user_id = %bundle.user_id, "Logged in");

        Ok(self.session_info()?)
    }

    /// Explicit logout: clear all credentials and move to the entry point.
    pub fn logout(&self) -> std::result::Result<(), StoreError> {
        self.inner.teardown(TeardownReason::Logout)
    }
}

/// Builder for [`SessionManager`].
pub struct SessionManagerBuilder {
    http: reqwest::Client,
    base_url: String,
    store: Option<Arc<dyn CredentialStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    refresh_threshold: Duration,
    metrics: Option<MetricsCollector>,
}

impl SessionManagerBuilder {
    /// Credential store backend. Defaults to an in-memory store.
    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Navigator. Defaults to a [`HeadlessNavigator`] at `/`.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// How close to expiry a token must be before a 401 triggers a refresh.
    pub fn refresh_threshold(mut self, threshold: Duration) -> Self {
        self.refresh_threshold = threshold;
        self
    }

    pub fn metrics(mut self, metrics: Option<MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn build(self) -> SessionManager {
        SessionManager {
            inner: Arc::new(SessionInner {
                http: self.http,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                store: self
                    .store
                    .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new())),
                navigator: self
                    .navigator
                    .unwrap_or_else(|| Arc::new(HeadlessNavigator::new())),
                refresh_threshold: self.refresh_threshold,
                metrics: self.metrics,
                refresh: Mutex::new(RefreshState::default()),
            }),
        }
    }
}
