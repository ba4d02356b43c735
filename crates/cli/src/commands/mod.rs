//! CLI command implementations.
//!
//! Every command builds its own [`MaintClient`] from the resolved
//! configuration. The headless navigator records where the command runs so a
//! failed token refresh knows whether to end the session.

pub mod attachments;
pub mod equipment;
pub mod history;
pub mod session;
pub mod task_logs;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use anyhow::{Context, Result};
use maintdesk_client::{HeadlessNavigator, MaintClient, MetricsCollector};
use maintdesk_config::Config;

/// Location reported by commands that act on dashboard data.
pub const DASHBOARD_LOCATION: &str = "/";

/// Build a client whose navigator starts at `location`.
pub fn build_client(config: &Config, location: &str) -> Result<MaintClient> {
    MaintClient::builder()
        .from_config(config)
        .navigator(Arc::new(HeadlessNavigator::at(location)))
        .metrics(MetricsCollector::new())
        .build()
        .context("Failed to build API client")
}

/// Build a client for dashboard commands.
pub fn build_client_from_config(config: &Config) -> Result<MaintClient> {
    build_client(config, DASHBOARD_LOCATION)
}
