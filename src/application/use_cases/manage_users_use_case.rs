//! User list, create, edit and delete workflow.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::SessionStore;
use crate::domain::entities::{AuthToken, User, UserId};
use crate::domain::errors::ApiError;
use crate::domain::ports::{UserDraft, UserPort};

/// Protected user operations. Each call reads the session token just before
/// issuing its request and fails with [`ApiError::NotAuthenticated`] when
/// there is none.
#[derive(Clone)]
pub struct ManageUsersUseCase {
    user_port: Arc<dyn UserPort>,
    session: SessionStore,
}

impl ManageUsersUseCase {
    #[must_use]
    pub const fn new(user_port: Arc<dyn UserPort>, session: SessionStore) -> Self {
        Self { user_port, session }
    }

    fn token(&self) -> Result<AuthToken, ApiError> {
        self.session.token().ok_or(ApiError::NotAuthenticated)
    }

    /// Fetches every user.
    ///
    /// # Errors
    /// Returns error if there is no session or the request fails.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let token = self.token()?;
        let users = self.user_port.list_users(&token).await?;
        debug!(count = users.len(), "Loaded users");
        Ok(users)
    }

    /// Fetches one user for editing.
    ///
    /// # Errors
    /// Returns error if there is no session or the request fails.
    pub async fn fetch(&self, id: UserId) -> Result<User, ApiError> {
        let token = self.token()?;
        self.user_port.get_user(&token, id).await.map_err(|e| {
            warn!(user_id = %id, error = %e, "Failed to fetch user");
            e
        })
    }

    /// # Errors
    /// Returns error if there is no session or the server rejects the draft.
    pub async fn create(&self, draft: &UserDraft) -> Result<User, ApiError> {
        let token = self.token()?;
        let user = self.user_port.create_user(&token, draft).await?;
        info!(user_id = %user.id(), "User created");
        Ok(user)
    }

    /// # Errors
    /// Returns error if there is no session or the server rejects the draft.
    pub async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, ApiError> {
        let token = self.token()?;
        let user = self.user_port.update_user(&token, id, draft).await?;
        info!(user_id = %id, "User updated");
        Ok(user)
    }

    /// Deletes a user, then refetches the list exactly once.
    ///
    /// # Errors
    /// Returns error if there is no session, the delete fails, or the refetch
    /// fails. A failed delete is not followed by a refetch.
    pub async fn delete_and_refetch(&self, id: UserId) -> Result<Vec<User>, ApiError> {
        let token = self.token()?;
        self.user_port.delete_user(&token, id).await.map_err(|e| {
            warn!(user_id = %id, error = %e, "Failed to delete user");
            e
        })?;
        info!(user_id = %id, "User deleted");

        self.list().await
    }
}
