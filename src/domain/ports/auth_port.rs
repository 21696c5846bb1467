//! Authentication port definition.

use std::fmt;

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, User};
use crate::domain::errors::ApiError;

/// Email and password submitted by the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account details submitted by the registration form.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login: the authenticated user and their session token.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub user: User,
    pub token: AuthToken,
}

/// Port for the public authentication endpoints.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchanges credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError>;

    /// Creates an account.
    async fn register(&self, registration: &Registration) -> Result<User, ApiError>;
}
