//! Error types for the maintdesk client.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Why a token refresh could not produce a new access token.
///
/// Cloneable so a single failure can be delivered to every request that was
/// waiting on the same refresh.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshError {
    /// A refresh was needed but no refresh token is stored.
    #[error("no refresh token is stored")]
    NoRefreshToken,

    /// The stored access token is not within the refresh threshold of expiry.
    #[error("refresh not applicable: access token is not near expiry")]
    NotApplicable,

    /// The refresh call never produced a response.
    #[error("refresh request failed: {0}")]
    Transport(String),

    /// The authentication API answered the refresh call with a non-2xx status.
    #[error("refresh rejected by server (status {status})")]
    Rejected { status: u16 },

    /// The refresh response could not be parsed into a credential bundle.
    #[error("invalid refresh response: {0}")]
    InvalidBundle(String),

    /// The new credentials could not be read or persisted.
    #[error("credential store error: {0}")]
    Store(String),

    /// The refresh task stopped without reporting an outcome.
    #[error("refresh ended without an outcome")]
    Abandoned,
}

impl RefreshError {
    /// True if the refresh call itself was attempted and failed.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Rejected { .. } | Self::InvalidBundle(_)
        )
    }

    /// True if this failure tears the session down for non-exempt callers.
    pub fn ends_session(&self) -> bool {
        !matches!(self, Self::NotApplicable | Self::Abandoned)
    }
}

/// Errors raised by a [`crate::CredentialStore`] backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read credential store at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write credential store at {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credential store at {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur during maintdesk client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Login was refused.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-2xx response from the API.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// The request was unauthorized and the session could not be refreshed.
    #[error("Session expired at {url}: {cause}")]
    SessionExpired { url: String, cause: RefreshError },

    /// The request was still unauthorized after replaying it with a refreshed token.
    #[error("Unauthorized at {url}: {message}")]
    Unauthorized { url: String, message: String },

    /// The stored role does not allow this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid response format from the API.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Credential store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClientError {
    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AuthFailed(_) | Self::SessionExpired { .. } | Self::Unauthorized { .. }
        )
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::SessionExpired { .. } | Self::Unauthorized { .. } => Some(401),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
