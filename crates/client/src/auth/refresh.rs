//! Single-flight token refresh.
//!
//! Responsibilities:
//! - Run at most one refresh call per session at a time.
//! - Queue callers that arrive while a refresh is in flight and settle them
//!   all, in arrival order, with the outcome of that one call.
//! - Persist a refreshed bundle before any waiter is released.
//! - Tear the session down when the refresh call fails or no refresh token is
//!   stored, unless every caller in the queue was exempt.
//!
//! Invariants:
//! - `in_flight` is true iff a refresh task is running.
//! - Joining the queue and claiming leadership happen under one lock, which
//!   is never held across an `.await`.
//! - The refresh runs on its own task, so a dropped caller cannot strand the
//!   queue or leave `in_flight` set.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use maintdesk_config::constants::{KEY_EXPIRY, KEY_REFRESH_TOKEN};
use secrecy::SecretString;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::SessionInner;
use super::teardown::TeardownReason;
use crate::credentials::{persist_bundle, read_non_empty};
use crate::endpoints;
use crate::error::{RefreshError, StoreError};
use crate::metrics::RefreshOutcome;
use crate::serde_helpers::parse_timestamp;

type Settlement = Result<SecretString, RefreshError>;

/// Refresh bookkeeping shared by every request of one session.
#[derive(Default)]
pub(crate) struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<Settlement>>,
    /// Set once any non-exempt caller has joined the current refresh.
    teardown_on_failure: bool,
}

impl RefreshState {
    pub(crate) fn lock(state: &Mutex<Self>) -> MutexGuard<'_, Self> {
        state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.in_flight
    }
}

/// Whether a token expiring at `expiry` should be refreshed at `now`.
///
/// Due when the remaining lifetime is at most `threshold`, which includes
/// tokens that have already expired. An unknown expiry is always due.
pub fn is_refresh_due(
    expiry: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    threshold: Duration,
) -> bool {
    let Some(expiry) = expiry else {
        return true;
    };
    let threshold = TimeDelta::from_std(threshold).unwrap_or(TimeDelta::MAX);
    expiry.signed_duration_since(now) <= threshold
}

fn store_failure(err: StoreError) -> RefreshError {
    RefreshError::Store(err.to_string())
}

impl SessionInner {
    /// Obtain a fresh access token, starting a refresh or joining the one in flight.
    ///
    /// `exempt` marks a caller that must not cause a teardown on failure. The
    /// session is still torn down if another, non-exempt caller joined.
    pub(crate) async fn refreshed_token(self: &Arc<Self>, exempt: bool) -> Settlement {
        let (tx, rx) = oneshot::channel();
        let leader = {
            let mut state = RefreshState::lock(&self.refresh);
            state.waiters.push(tx);
            state.teardown_on_failure |= !exempt;
            if state.in_flight {
                false
            } else {
                state.in_flight = true;
                true
            }
        };

        if leader {
            let inner = Arc::clone(self);
            tokio::spawn(async move { inner.run_refresh().await });
        } else {
            debug!("Joining in-flight token refresh");
            if let Some(metrics) = &self.metrics {
                metrics.record_refresh(RefreshOutcome::Joined);
            }
        }

        rx.await.unwrap_or(Err(RefreshError::Abandoned))
    }

    async fn run_refresh(self: Arc<Self>) {
        let outcome = self.exchange_refresh_token().await;

        match &outcome {
            Ok(_) => {
                info!("Access token refreshed");
                if let Some(metrics) = &self.metrics {
                    metrics.record_refresh(RefreshOutcome::Success);
                }
            }
            Err(cause) => {
                warn!(cause = %cause, "Token refresh failed");
                if let Some(metrics) = &self.metrics {
                    let label = if cause.is_network_failure() {
                        RefreshOutcome::Failure
                    } else {
                        RefreshOutcome::Skipped
                    };
                    metrics.record_refresh(label);
                }
            }
        }

        self.settle(outcome);
    }

    /// Make the refresh call if the stored credentials allow one.
    async fn exchange_refresh_token(&self) -> Settlement {
        let store = self.store.as_ref();

        let refresh_token = read_non_empty(store, KEY_REFRESH_TOKEN)
            .map_err(store_failure)?
            .ok_or(RefreshError::NoRefreshToken)?;
        let expiry = read_non_empty(store, KEY_EXPIRY)
            .map_err(store_failure)?
            .and_then(|raw| parse_timestamp(&raw));

        if !is_refresh_due(expiry, Utc::now(), self.refresh_threshold) {
            return Err(RefreshError::NotApplicable);
        }

        let refresh_token = SecretString::new(refresh_token.into());
        let bundle = endpoints::refresh_token(&self.http, &self.base_url, &refresh_token).await?;
        persist_bundle(store, &bundle).map_err(store_failure)?;

        Ok(SecretString::new(bundle.token.into()))
    }

    fn teardown_after_failure(&self, cause: &RefreshError, teardown_on_failure: bool) {
        if !cause.ends_session() {
            debug!(cause = %cause, "Keeping session");
            return;
        }
        if !teardown_on_failure {
            debug!("Refresh triggered by an authentication request, keeping session");
            return;
        }
        if self.on_entry_point() {
            debug!("Already on the entry point, keeping session");
            return;
        }

        let reason = match cause {
            RefreshError::NoRefreshToken => TeardownReason::MissingRefreshToken,
            _ => TeardownReason::RefreshFailed,
        };
        if let Err(e) = self.teardown(reason) {
            warn!(error = %e, "Failed to clear credential store during teardown");
        }
    }

    /// Tear down if the failure calls for it, then release every waiter with
    /// `outcome` and end the refresh.
    ///
    /// The teardown runs under the state lock so no caller can join between
    /// the decision and the release.
    fn settle(&self, outcome: Settlement) {
        let waiters = {
            let mut state = RefreshState::lock(&self.refresh);
            if let Err(cause) = &outcome {
                self.teardown_after_failure(cause, state.teardown_on_failure);
            }
            state.in_flight = false;
            state.teardown_on_failure = false;
            std::mem::take(&mut state.waiters)
        };

        let count = waiters.len();
        for waiter in waiters {
            // A dropped receiver only means that caller went away.
            let _ = waiter.send(outcome.clone());
        }
        debug!(waiters = count, "Refresh waiters settled");
    }
}
