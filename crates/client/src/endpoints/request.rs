//! Response mapping shared by all endpoints.
//!
//! Turns the final response of the session pipeline into a typed result:
//! 2xx passes through, a 401 becomes [`ClientError::Unauthorized`] (it can
//! only be the replayed attempt), anything else becomes
//! [`ClientError::ApiError`] with the server's message when one can be found.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

const REQUEST_ID_HEADERS: [&str; 2] = ["X-Request-Id", "X-Correlation-Id"];

/// Map a non-success response to an error.
pub async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let request_id = REQUEST_ID_HEADERS.iter().find_map(|name| {
        response
            .headers()
            .get(*name)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string())
    });
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());
    let message = extract_error_message(&body, status);

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized { url, message });
    }

    Err(ClientError::ApiError {
        status: status.as_u16(),
        url,
        message,
        request_id,
    })
}

/// Deserialize a JSON response body.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let url = response.url().to_string();
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::InvalidResponse(format!("{url}: {e}")))
}

/// Deserialize a JSON response body, treating an empty body as `None`.
pub async fn read_optional_json<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    let url = response.url().to_string();
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| ClientError::InvalidResponse(format!("{url}: {e}")))
}

/// Pull a readable message out of an error body.
///
/// Understands `{ "message": .. }` bodies and problem-details bodies with
/// `detail`, `errors` and `title`. Falls back to the raw body, then to the
/// status reason.
pub fn extract_error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "detail"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str())
                && !text.trim().is_empty()
            {
                return text.to_string();
            }
        }

        if let Some(errors) = value.get("errors").and_then(|v| v.as_object()) {
            let mut parts: Vec<String> = errors
                .iter()
                .map(|(field, problems)| {
                    let problems = match problems {
                        serde_json::Value::Array(items) => items
                            .iter()
                            .filter_map(|i| i.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                        other => other.as_str().unwrap_or_default().to_string(),
                    };
                    format!("{field}: {problems}")
                })
                .collect();
            parts.sort();
            if !parts.is_empty() {
                return parts.join("; ");
            }
        }

        if let Some(title) = value.get("title").and_then(|v| v.as_str()) {
            return title.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
