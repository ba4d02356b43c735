//! Configuration management for maintdesk.
//!
//! This crate provides the shared constants, configuration types and the
//! loader that merges `.env`, environment variables and explicit overrides.

pub mod constants;
mod loader;
pub mod paths;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{Config, ConnectionConfig, LoginConfig};
