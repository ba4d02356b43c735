//! Authentication endpoints.

use maintdesk_config::constants::{LOGIN_ENDPOINT_PATH, REFRESH_TOKEN_PATH};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::auth::SessionManager;
use crate::endpoints::{check_response, read_json};
use crate::error::{RefreshError, Result};
use crate::models::{AuthBundle, LoginRequest};

/// Log in with email and password.
///
/// Goes through the session pipeline like any other request; the path lies
/// under `/Authentication/`, so a failure never tears the session down. Being
/// exempt from teardown does not skip the refresh: a 401 with a due refresh
/// token stored still refreshes that session before the replay.
pub async fn login(
    session: &SessionManager,
    email: &str,
    password: &SecretString,
) -> Result<AuthBundle> {
    debug!("Logging in as {}", email);

    let url = session.url(LOGIN_ENDPOINT_PATH);
    let body = LoginRequest {
        email: email.to_string(),
        password: password.clone(),
    };
    let response = session.send(|http| http.post(&url).json(&body)).await?;
    let response = check_response(response).await?;
    read_json(response).await
}

/// Exchange a refresh token for a new credential bundle.
///
/// Sent directly, outside the session pipeline, so it is never decorated or
/// replayed.
pub async fn refresh_token(
    client: &Client,
    base_url: &str,
    refresh_token: &SecretString,
) -> std::result::Result<AuthBundle, RefreshError> {
    debug!("Refreshing access token");

    let url = format!("{}{}", base_url, REFRESH_TOKEN_PATH);
    let response = client
        .post(&url)
        .query(&[("Token", refresh_token.expose_secret())])
        .send()
        .await
        .map_err(|e| RefreshError::Transport(e.without_url().to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RefreshError::Rejected {
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| RefreshError::Transport(e.without_url().to_string()))?;
    serde_json::from_str(&body).map_err(|e| RefreshError::InvalidBundle(e.to_string()))
}
