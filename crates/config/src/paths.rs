//! Path helpers for maintdesk file locations.
//!
//! Responsibilities:
//! - Determine the platform-appropriate location of the credential store.
//! - Use `directories` crate for platform-appropriate paths.
//!
//! Does NOT handle:
//! - File I/O operations (see the credential store in `crates/client`).

use std::path::PathBuf;

use anyhow::Context;

use crate::constants::{APP_DIR_NAME, SESSION_FILE_NAME};

/// Returns the default path to the persisted session file.
///
/// - Linux: `~/.local/share/maintdesk/session.json`
/// - macOS: `~/Library/Application Support/maintdesk/session.json`
/// - Windows: `%AppData%\maintdesk\data\session.json`
pub fn default_session_path() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_DIR_NAME)
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.data_dir().join(SESSION_FILE_NAME))
}
