//! Ctrl+C handling for long-running commands.
//!
//! Invariants:
//! - Once cancelled, a token remains cancelled.

use std::fmt;
use std::future::Future;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Notify;

/// Cancellation token shared between the signal listener and commands.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the token (idempotent).
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Wait until the token is cancelled.
    pub async fn cancelled(&self) {
        // Register before checking the flag so a concurrent cancel is not missed.
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }

    /// Run `fut` unless the token is cancelled first.
    pub async fn run<F, T, E>(&self, fut: F) -> anyhow::Result<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        tokio::select! {
            res = fut => res.map_err(Into::into),
            _ = self.cancelled() => Err(Cancelled.into()),
        }
    }
}

/// Error returned when the user interrupts a command.
#[derive(Debug, Clone, Copy)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.is::<Cancelled>()
}

pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_completes_when_not_cancelled() {
        let token = CancellationToken::new();
        let value = token.run(async { Ok::<_, anyhow::Error>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_run_returns_cancelled_after_cancel() {
        let token = CancellationToken::new();
        token.cancel();
        token.cancel();
        let err = token
            .run(std::future::pending::<Result<(), anyhow::Error>>())
            .await
            .unwrap_err();
        assert!(is_cancelled_error(&err));
    }
}
