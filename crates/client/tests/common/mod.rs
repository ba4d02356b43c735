//! Common test utilities for integration tests.
//!
//! Shared helpers for building a client against a wiremock server with an
//! in-memory credential store and a headless navigator, so tests can inspect
//! both after the fact.
//!
//! # What this does NOT handle
//! - Mock setup for specific endpoints (use wiremock directly in tests)

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use maintdesk_config::constants::{
    KEY_ACCESS_TOKEN, KEY_EXPIRY, KEY_NAME, KEY_REFRESH_TOKEN, KEY_ROLE, KEY_USER_ID,
};

#[allow(unused_imports)]
pub use maintdesk_client::testing::load_fixture;

#[allow(unused_imports)]
pub use maintdesk_client::{
    ClientError, CredentialStore, HeadlessNavigator, MaintClient, MemoryCredentialStore,
    Navigator, RefreshError,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Access token the server accepts after a successful refresh.
#[allow(dead_code)]
pub const REFRESHED_TOKEN: &str = "access-token-refreshed";

/// A client, its store and its navigator.
#[allow(dead_code)]
pub struct Harness {
    pub client: MaintClient,
    pub store: Arc<MemoryCredentialStore>,
    pub navigator: Arc<HeadlessNavigator>,
}

/// Build a client for `server` with an empty store, positioned at `location`.
#[allow(dead_code)]
pub fn harness(server: &MockServer, location: &str) -> Harness {
    let store = Arc::new(MemoryCredentialStore::new());
    let navigator = Arc::new(HeadlessNavigator::at(location));
    let client = MaintClient::builder()
        .base_url(server.uri())
        .credential_store(store.clone())
        .navigator(navigator.clone())
        .build()
        .unwrap();
    Harness {
        client,
        store,
        navigator,
    }
}

/// Seed a logged-in session.
#[allow(dead_code)]
pub fn seed_session(
    store: &MemoryCredentialStore,
    access_token: &str,
    refresh_token: Option<&str>,
    expiry: DateTime<Utc>,
    role: &str,
) {
    let mut entries = vec![
        (KEY_ACCESS_TOKEN, access_token.to_string()),
        (
            KEY_EXPIRY,
            expiry.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        (KEY_ROLE, role.to_string()),
        (KEY_USER_ID, "1".to_string()),
        (KEY_NAME, "Test User".to_string()),
    ];
    if let Some(refresh_token) = refresh_token {
        entries.push((KEY_REFRESH_TOKEN, refresh_token.to_string()));
    }
    store.set_many(&entries).unwrap();
}

/// Seed a session whose access token expired a minute ago.
#[allow(dead_code)]
pub fn seed_expired_session(store: &MemoryCredentialStore, refresh_token: Option<&str>) {
    seed_session(
        store,
        "stale-token",
        refresh_token,
        Utc::now() - TimeDelta::minutes(1),
        "Technician",
    );
}

#[allow(dead_code)]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
