//! REST API endpoint implementations.
//!
//! Each function sends one logical request through the [`crate::SessionManager`]
//! pipeline and maps the final response to a typed result.

mod attachments;
mod auth;
mod request;
mod resources;

pub use attachments::{download as download_attachment, upload as upload_attachment};
pub use auth::{login, refresh_token};
pub use request::{check_response, extract_error_message, read_json, read_optional_json};
pub use resources::{create, delete, get, list, update};
