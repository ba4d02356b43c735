//! Main maintdesk API client.
//!
//! [`MaintClient`] is the typed front door to the API. Every call goes through
//! the client's [`SessionManager`], which decorates requests with the stored
//! bearer token and handles refresh and replay on 401 responses.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Login, logout and session inspection
//! - `resources`: Equipment, history, task and task log methods
//! - `attachments`: Attachment upload and download
//! - `users`: Admin-only user management
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Token refresh and replay (delegated to [`crate::auth`])

pub mod builder;

mod attachments;
mod resources;
mod session;
mod users;

use crate::auth::SessionManager;

/// maintdesk API client.
///
/// Cheap to clone; clones share one session.
///
/// ```rust,ignore
/// use maintdesk_client::MaintClient;
///
/// let client = MaintClient::builder()
///     .base_url("https://maint.example.com/api".to_string())
///     .build()?;
/// client.login("tech@example.com", &password).await?;
/// let equipment = client.list_equipment().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MaintClient {
    pub(crate) session: SessionManager,
}

impl MaintClient {
    pub fn builder() -> builder::MaintClientBuilder {
        builder::MaintClientBuilder::new()
    }

    /// Wrap an existing session manager.
    pub fn from_session(session: SessionManager) -> Self {
        Self { session }
    }

    pub fn base_url(&self) -> &str {
        self.session.base_url()
    }

    /// The underlying session manager.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }
}
