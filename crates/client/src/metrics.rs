//! Metrics collection for API calls and session events.
//!
//! This module provides metrics collection for maintdesk API calls, including:
//! - Request latency histograms and request counters
//! - Error categorization
//! - Auth replays, refresh outcomes and session teardowns
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (see [`crate::metrics_exporter`])
//!
//! # Invariants
//! - All request metrics use the label names `endpoint`, `method`, `status`, `error_category`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "maintdesk_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "maintdesk_api_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "maintdesk_api_errors_total";

/// Metric name for requests replayed after a token refresh.
pub const METRIC_AUTH_REPLAYS_TOTAL: &str = "maintdesk_auth_replays_total";

/// Metric name for token refresh outcomes.
pub const METRIC_REFRESH_TOTAL: &str = "maintdesk_auth_refresh_total";

/// Metric name for session teardowns.
pub const METRIC_TEARDOWNS_TOTAL: &str = "maintdesk_session_teardowns_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// Request timeout
    Timeout,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Session could not be kept alive
    Auth,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::HttpError(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::HttpError(e) if e.is_connect() || e.is_request() => {
                ErrorCategory::Transport
            }
            ClientError::ApiError { status, .. } if (400..500).contains(status) => {
                ErrorCategory::Http4xx
            }
            ClientError::ApiError { status, .. } if (500..600).contains(status) => {
                ErrorCategory::Http5xx
            }
            ClientError::SessionExpired { .. }
            | ClientError::Unauthorized { .. }
            | ClientError::AuthFailed(_) => ErrorCategory::Auth,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Outcome label for a refresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new bundle was obtained and persisted.
    Success,
    /// The refresh call failed.
    Failure,
    /// No call was made (missing refresh token, or token not near expiry).
    Skipped,
    /// The caller waited on a refresh another request started.
    Joined,
}

impl RefreshOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RefreshOutcome::Success => "success",
            RefreshOutcome::Failure => "failure",
            RefreshOutcome::Skipped => "skipped",
            RefreshOutcome::Joined => "joined",
        }
    }
}

/// Metrics collector for maintdesk API calls.
///
/// A lightweight wrapper around the `metrics` crate macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of one HTTP attempt.
    ///
    /// `status` is `None` if the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, including replays.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error from a ClientError, categorizing it automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record a request replayed with a refreshed token.
    pub fn record_auth_replay(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_AUTH_REPLAYS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    pub fn record_refresh(&self, outcome: RefreshOutcome) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_REFRESH_TOTAL, "outcome" => outcome.as_str()).increment(1);
    }

    pub fn record_teardown(&self, reason: &'static str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_TEARDOWNS_TOTAL, "reason" => reason).increment(1);
    }
}
