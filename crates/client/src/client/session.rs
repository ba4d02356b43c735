//! Login, logout and session inspection for [`MaintClient`].

use secrecy::SecretString;

use crate::client::MaintClient;
use crate::credentials::SessionInfo;
use crate::error::{ClientError, Result};
use crate::models::Role;

impl MaintClient {
    /// Log in and persist the returned credentials.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<SessionInfo> {
        self.session.login(email, password).await
    }

    /// Clear the stored session and move to the login page.
    pub fn logout(&self) -> Result<()> {
        Ok(self.session.logout()?)
    }

    /// Typed view of the stored session.
    pub fn session_info(&self) -> Result<SessionInfo> {
        Ok(self.session.session_info()?)
    }

    /// Fail with [`ClientError::Forbidden`] unless the stored role is Admin.
    pub(crate) fn require_admin(&self, action: &str) -> Result<()> {
        let info = self.session_info()?;
        match info.role {
            Some(Role::Admin) => Ok(()),
            Some(role) => Err(ClientError::Forbidden(format!(
                "{action} requires the Admin role (current role: {role})"
            ))),
            None => Err(ClientError::Forbidden(format!(
                "{action} requires the Admin role (not logged in)"
            ))),
        }
    }
}
