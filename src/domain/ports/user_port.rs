//! User management port definition.

use std::fmt;

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, User, UserId};
use crate::domain::errors::ApiError;

/// Field values submitted by the create and edit forms.
///
/// `password` is `None` when an edit leaves the password unchanged.
#[derive(Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

impl UserDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: None,
        }
    }

    /// Sets password; an empty string means "unchanged".
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        self.password = (!password.is_empty()).then_some(password);
        self
    }
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Port for the protected user endpoints. Every call carries the bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPort: Send + Sync {
    /// Lists all users.
    async fn list_users(&self, token: &AuthToken) -> Result<Vec<User>, ApiError>;

    /// Fetches a single user.
    async fn get_user(&self, token: &AuthToken, id: UserId) -> Result<User, ApiError>;

    /// Creates a user.
    async fn create_user(&self, token: &AuthToken, draft: &UserDraft) -> Result<User, ApiError>;

    /// Updates a user.
    async fn update_user(
        &self,
        token: &AuthToken,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<User, ApiError>;

    /// Deletes a user.
    async fn delete_user(&self, token: &AuthToken, id: UserId) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_means_unchanged() {
        let draft = UserDraft::new("Rina", "rina@example.com").with_password("");
        assert_eq!(draft.password, None);

        let draft = UserDraft::new("Rina", "rina@example.com").with_password("secret1");
        assert_eq!(draft.password.as_deref(), Some("secret1"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let draft = UserDraft::new("Rina", "rina@example.com").with_password("hunter22");
        assert!(!format!("{draft:?}").contains("hunter22"));
    }
}
