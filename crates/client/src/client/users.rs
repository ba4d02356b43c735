//! User management methods for [`MaintClient`].
//!
//! Every method here is Admin-only. The stored role is checked before any
//! request is sent; the server remains the authority and may still refuse.

use crate::client::MaintClient;
use crate::error::Result;
use crate::models::{CreateUserParams, UpdateUserParams, User};

impl MaintClient {
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.require_admin("Listing users")?;
        self.list(&[]).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.require_admin("Viewing users")?;
        self.get(id).await
    }

    pub async fn create_user(&self, params: &CreateUserParams) -> Result<User> {
        self.require_admin("Creating users")?;
        self.create(params).await
    }

    pub async fn update_user(&self, id: &str, params: &UpdateUserParams) -> Result<Option<User>> {
        self.require_admin("Updating users")?;
        self.update(id, params).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.require_admin("Deleting users")?;
        self.delete::<User>(id).await
    }
}
