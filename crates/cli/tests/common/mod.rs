//! Shared test utilities for maintdesk CLI integration tests.
//!
//! Invariants / Assumptions:
//! - Every command is hermetic: no `.env` loading and no `MAINTDESK_*`
//!   variables inherited from the host.
//! - Sessions live in a per-test temporary directory.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub use maintdesk_client::testing::load_fixture;

/// Returns a hermetic `maintdesk` command.
pub fn maintdesk_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("maintdesk");

    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("MAINTDESK_BASE_URL")
        .env_remove("MAINTDESK_EMAIL")
        .env_remove("MAINTDESK_PASSWORD")
        .env_remove("MAINTDESK_TIMEOUT")
        .env_remove("MAINTDESK_SKIP_VERIFY")
        .env_remove("MAINTDESK_REFRESH_THRESHOLD")
        .env_remove("MAINTDESK_SESSION_PATH")
        .env_remove("MAINTDESK_LOG_FORMAT")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic command pointed at `base_url` with its session in `session_path`.
pub fn maintdesk_cmd_with(base_url: &str, session_path: &Path) -> Command {
    let mut cmd = maintdesk_cmd();
    cmd.env("MAINTDESK_BASE_URL", base_url)
        .env("MAINTDESK_SESSION_PATH", session_path);
    cmd
}

pub fn session_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("session.json")
}

/// Write a stored session the way the client persists it.
pub fn seed_session(path: &Path, access_token: &str, expiry: &str, role: &str) {
    let session = serde_json::json!({
        "AccessToken": access_token,
        "Expiry": expiry,
        "RefreshToken": "refresh-token-1",
        "Role": role,
        "userId": "17",
        "Name": "Ana Tech",
    });
    std::fs::write(path, serde_json::to_string_pretty(&session).unwrap()).unwrap();
}

pub fn seed_technician(path: &Path) {
    seed_session(path, "tech-token", "2099-01-01T00:00:00.000Z", "Technician");
}

pub fn read_session(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
