//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` variants to exit codes.
//! - Detect forced logouts so the user can be told to log in again.
//!
//! Invariants:
//! - Exit codes 1-6 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (128 + SIGINT).

use maintdesk_client::ClientError;

/// Structured exit codes for `maintdesk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Invalid credentials or an ended session.
    ///
    /// Scripts should run `maintdesk login` again.
    AuthenticationFailed = 2,

    /// Network, timeout, TLS or URL failure.
    ConnectionError = 3,

    NotFound = 4,

    /// Bad parameters or a response the client could not parse.
    ValidationError = 5,

    /// The current role may not perform the operation.
    PermissionDenied = 6,

    Interrupted = 130,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_)
            | ClientError::SessionExpired { .. }
            | ClientError::Unauthorized { .. } => ExitCode::AuthenticationFailed,

            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }
            ClientError::HttpError(_) => ExitCode::GeneralError,

            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,
            ClientError::ApiError {
                status: 400 | 409 | 422,
                ..
            } => ExitCode::ValidationError,
            ClientError::InvalidResponse(_) => ExitCode::ValidationError,

            ClientError::Forbidden(_) | ClientError::ApiError { status: 403, .. } => {
                ExitCode::PermissionDenied
            }

            ClientError::ApiError { .. } | ClientError::Store(_) => ExitCode::GeneralError,
        }
    }
}

/// Extract exit codes from `anyhow` errors.
pub trait ExitCodeExt {
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ClientError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}

/// Whether `err` means the stored session was torn down.
///
/// Refresh failures end the session except when the command ran from the
/// login page, where nothing is cleared. A token that was rejected before it
/// was due for refresh leaves the session in place.
pub fn is_forced_logout(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<ClientError>(),
            Some(ClientError::SessionExpired { cause, .. }) if cause.ends_session()
        )
    })
}
