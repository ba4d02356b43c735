//! maintdesk REST API client.
//!
//! This crate provides a type-safe client for the maintenance dashboard API.
//! Every request passes through a [`SessionManager`], which attaches the stored
//! bearer token, refreshes it at most once per session on a 401 and replays the
//! failed request, and tears the session down when the refresh fails.

pub mod auth;
pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
mod serde_helpers;
pub mod telemetry;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::{
    HeadlessNavigator, Navigator, SessionManager, SessionManagerBuilder, TeardownReason, decorate,
    is_refresh_due,
};
pub use client::MaintClient;
pub use client::builder::MaintClientBuilder;
pub use credentials::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, SessionInfo, persist_bundle,
};
pub use error::{ClientError, RefreshError, Result, StoreError};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    Attachment, AttachmentContent, AttachmentUpload, AuthBundle, CreateUserParams, Equipment,
    EquipmentParams, HistoryParams, MaintenanceHistory, MaintenanceTask, Resource, Role, Section,
    TaskLog, TaskLogParams, TaskParams, TaskStatus, UpdateUserParams, User,
};
pub use telemetry::{LogFormat, TracingConfig, TracingError, TracingGuard};
