//! Session teardown and the navigation abstraction it drives.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use maintdesk_config::constants::LOGIN_PATH;
use tracing::info;

use super::SessionInner;
use crate::error::StoreError;

/// Current location of the front end, and a way to move it.
pub trait Navigator: Send + Sync + fmt::Debug {
    /// Path of the current location, e.g. `/login`.
    fn current_path(&self) -> String;

    /// Move to `path`.
    fn navigate(&self, path: &str);
}

/// In-memory navigator for front ends without a real location.
#[derive(Debug)]
pub struct HeadlessNavigator {
    path: Mutex<String>,
}

impl HeadlessNavigator {
    /// A navigator positioned at `/`.
    pub fn new() -> Self {
        Self::at("/")
    }

    /// A navigator positioned at `path`.
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: Mutex::new(path.into()),
        }
    }
}

impl Default for HeadlessNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for HeadlessNavigator {
    fn current_path(&self) -> String {
        self.path
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn navigate(&self, path: &str) {
        *self.path.lock().unwrap_or_else(PoisonError::into_inner) = path.to_string();
    }
}

/// What caused a teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownReason {
    Logout,
    RefreshFailed,
    MissingRefreshToken,
}

impl TeardownReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            TeardownReason::Logout => "logout",
            TeardownReason::RefreshFailed => "refresh_failed",
            TeardownReason::MissingRefreshToken => "missing_refresh_token",
        }
    }
}

impl SessionInner {
    /// True when the front end is already on the unauthenticated entry point.
    pub(crate) fn on_entry_point(&self) -> bool {
        self.navigator.current_path() == LOGIN_PATH
    }

    /// Clear all credentials and move to the entry point.
    ///
    /// Navigation happens even if clearing the store fails; the store error is
    /// returned afterwards.
    pub(crate) fn teardown(&self, reason: TeardownReason) -> Result<(), StoreError> {
        let cleared = self.store.clear();
        if !self.on_entry_point() {
            self.navigator.navigate(LOGIN_PATH);
        }
        if let Some(metrics) = &self.metrics {
            metrics.record_teardown(reason.as_str());
        }
        info!(reason = reason.as_str(), "Session cleared");
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_navigator_tracks_location() {
        let nav = HeadlessNavigator::new();
        assert_eq!(nav.current_path(), "/");
        nav.navigate("/login");
        assert_eq!(nav.current_path(), "/login");
        assert_eq!(HeadlessNavigator::at("/tasks").current_path(), "/tasks");
    }
}
