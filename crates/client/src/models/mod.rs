//! Data models for maintdesk API requests and responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod attachments;
pub mod auth;
pub mod equipment;
pub mod maintenance;
pub mod roles;
pub mod users;

use serde::de::DeserializeOwned;

pub use attachments::{Attachment, AttachmentContent, AttachmentUpload};
pub use auth::{AuthBundle, LoginRequest};
pub use equipment::{Equipment, EquipmentParams};
pub use maintenance::{
    HistoryParams, MaintenanceHistory, MaintenanceTask, TaskLog, TaskLogParams, TaskParams,
    TaskStatus,
};
pub use roles::{Role, Section};
pub use users::{CreateUserParams, UpdateUserParams, User};

/// An entity served under a fixed collection path.
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Collection path, e.g. `/Equipment`.
    const PATH: &'static str;
    /// Human-readable name used in log and error messages.
    const NAME: &'static str;
}
