//! Unauthorized-response interception and single replay.
//!
//! A request is described by a builder closure so it can be rebuilt for the
//! replay, including bodies that cannot be cloned such as multipart forms.
//!
//! Per request: `Sent -> Success | Unauthorized`, then
//! `Unauthorized -> Replayed-Success | Replayed-Failure`. The replay outcome is
//! returned unchanged; there is never a second replay.

use std::time::Instant;

use maintdesk_config::constants::AUTH_PATH_PREFIX;
use reqwest::{Request, RequestBuilder, Response, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::decorator::{decorate_optional, decorate_with, stored_access_token};
use super::{SessionInner, SessionManager};
use crate::error::{ClientError, Result};

/// Requests to the authentication API never cause a teardown.
pub(crate) fn is_auth_endpoint(url: &Url) -> bool {
    url.path().contains(AUTH_PATH_PREFIX)
}

/// The stored access token, if it differs from the one a request was sent with.
fn rotated_token(
    current: Option<SecretString>,
    sent: Option<&SecretString>,
) -> Option<SecretString> {
    let current = current?;
    match sent {
        Some(sent) if sent.expose_secret() == current.expose_secret() => None,
        _ => Some(current),
    }
}

impl SessionManager {
    /// Send a request through the session pipeline.
    ///
    /// `build` is called once for the first attempt and once more if the
    /// request is replayed after a token refresh. Only transport errors and
    /// refresh failures are returned as `Err`; every HTTP status, including a
    /// 401 on the replay, is returned as a response for the caller to map.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SessionExpired`] if the first attempt was
    /// unauthorized and no refreshed token could be obtained. By then the
    /// session has already been torn down if the refresh call failed or no
    /// refresh token was stored, unless the request was exempt.
    ///
    /// A 401 for a token that has since been replaced in the store is replayed
    /// with the stored token without consulting the refresh coordinator.
    pub async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder + Send,
    {
        let inner = &self.inner;

        let sent_token = stored_access_token(inner.store.as_ref());
        let request = decorate_optional(build(&inner.http), sent_token.as_ref()).build()?;
        let url = request.url().clone();
        let method = request.method().clone();

        let response = inner.execute(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let current = stored_access_token(inner.store.as_ref());
        let token = match rotated_token(current, sent_token.as_ref()) {
            Some(token) => {
                debug!(method = %method, url = %url, "Request unauthorized, token already rotated");
                token
            }
            None => {
                debug!(method = %method, url = %url, "Request unauthorized, obtaining refreshed token");
                let exempt = is_auth_endpoint(&url);
                match inner.refreshed_token(exempt).await {
                    Ok(token) => token,
                    Err(cause) => {
                        return Err(ClientError::SessionExpired {
                            url: url.to_string(),
                            cause,
                        });
                    }
                }
            }
        };

        if let Some(metrics) = &inner.metrics {
            metrics.record_auth_replay(url.path(), method.as_str());
        }
        debug!(method = %method, url = %url, "Replaying request with refreshed token");

        let replay = decorate_with(build(&inner.http), &token).build()?;
        inner.execute(replay).await
    }
}

impl SessionInner {
    /// Execute one HTTP attempt, recording request metrics.
    async fn execute(&self, request: Request) -> Result<Response> {
        let endpoint = request.url().path().to_string();
        let method = request.method().to_string();

        if let Some(metrics) = &self.metrics {
            metrics.record_request(&endpoint, &method);
        }

        let start = Instant::now();
        let result = self.http.execute(request).await;

        if let Some(metrics) = &self.metrics {
            let status = result.as_ref().ok().map(|r| r.status().as_u16());
            metrics.record_request_duration(&endpoint, &method, start.elapsed(), status);
        }

        result.map_err(|e| {
            let err = ClientError::from(e);
            if let Some(metrics) = &self.metrics {
                metrics.record_client_error(&endpoint, &method, &err);
            }
            err
        })
    }
}
