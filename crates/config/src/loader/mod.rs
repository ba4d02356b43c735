//! Configuration loader for environment variables and overrides.
//!
//! Responsibilities:
//! - Load configuration from `.env` files and `MAINTDESK_*` environment variables.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Reading or writing the credential store (see `crates/client`).
//!
//! Invariants / Assumptions:
//! - Explicit builder overrides take precedence over environment values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
