//! Centralized constants for the maintdesk workspace.
//!
//! This module contains default values and wire-level names used across
//! crates to avoid magic string and number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Session Defaults
// =============================================================================

/// How close to expiry (in seconds) an access token must be before a
/// refresh is attempted after a 401.
pub const DEFAULT_REFRESH_THRESHOLD_SECS: u64 = 60;

/// Maximum allowed refresh threshold in seconds (1 hour).
pub const MAX_REFRESH_THRESHOLD_SECS: u64 = 3600;

/// Unauthenticated entry point. Forced logouts redirect here, and refresh
/// failures while already here never redirect.
pub const LOGIN_PATH: &str = "/login";

/// Path segment shared by all authentication endpoints.
pub const AUTH_PATH_PREFIX: &str = "/Authentication/";

/// Token exchange endpoint (relative to the base URL).
pub const REFRESH_TOKEN_PATH: &str = "/Authentication/RefreshToken";

/// Credential login endpoint (relative to the base URL).
pub const LOGIN_ENDPOINT_PATH: &str = "/Authentication/Login";

// =============================================================================
// Credential Store Keys
// =============================================================================

/// Store key for the bearer access token.
pub const KEY_ACCESS_TOKEN: &str = "AccessToken";

/// Store key for the access token expiry (RFC 3339).
pub const KEY_EXPIRY: &str = "Expiry";

/// Store key for the refresh token.
pub const KEY_REFRESH_TOKEN: &str = "RefreshToken";

/// Store key for the primary role (first entry of `roles`).
pub const KEY_ROLE: &str = "Role";

/// Store key for the user identifier.
pub const KEY_USER_ID: &str = "userId";

/// Store key for the user's display name.
pub const KEY_NAME: &str = "Name";

/// Every key a session writes; teardown clears all of them.
pub const SESSION_KEYS: [&str; 6] = [
    KEY_ACCESS_TOKEN,
    KEY_EXPIRY,
    KEY_REFRESH_TOKEN,
    KEY_ROLE,
    KEY_USER_ID,
    KEY_NAME,
];

// =============================================================================
// Storage
// =============================================================================

/// Application directory name used for platform config/data paths.
pub const APP_DIR_NAME: &str = "maintdesk";

/// File name of the persisted credential store.
pub const SESSION_FILE_NAME: &str = "session.json";

// =============================================================================
// CLI Defaults
// =============================================================================

/// Default page size hint for list commands.
pub const DEFAULT_LIST_PAGE_SIZE: usize = 100;
