//! Outgoing request decoration.
//!
//! Attaches `Authorization: Bearer <token>` from the credential store and the
//! W3C trace context of the current span. Never fails: a store that cannot be
//! read is treated as holding no token.

use maintdesk_config::constants::KEY_ACCESS_TOKEN;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::credentials::{CredentialStore, read_non_empty};
use crate::telemetry::inject_trace_context;

/// Decorate a request with the stored access token, if any.
pub fn decorate(builder: RequestBuilder, store: &dyn CredentialStore) -> RequestBuilder {
    decorate_optional(builder, stored_access_token(store).as_ref())
}

/// Decorate with `token` when present, otherwise only with trace context.
pub(crate) fn decorate_optional(
    builder: RequestBuilder,
    token: Option<&SecretString>,
) -> RequestBuilder {
    let builder = inject_trace_context(builder);
    match token {
        Some(token) => with_bearer(builder, token),
        None => builder,
    }
}

/// Decorate a request with an explicit token, bypassing the store.
pub(crate) fn decorate_with(builder: RequestBuilder, token: &SecretString) -> RequestBuilder {
    with_bearer(inject_trace_context(builder), token)
}

fn with_bearer(builder: RequestBuilder, token: &SecretString) -> RequestBuilder {
    builder.bearer_auth(token.expose_secret())
}

pub(crate) fn stored_access_token(store: &dyn CredentialStore) -> Option<SecretString> {
    match read_non_empty(store, KEY_ACCESS_TOKEN) {
        Ok(token) => token.map(|t| SecretString::new(t.into())),
        Err(e) => {
            warn!(error = %e, "Could not read access token, sending request without it");
            None
        }
    }
}
