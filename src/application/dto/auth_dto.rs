//! Authentication DTOs.

use crate::domain::entities::User;

/// Where the current session token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token persisted by a previous login.
    Storage,
    /// Token passed on the command line or through the environment.
    CommandLine,
}

impl TokenSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Storage => "token storage",
            Self::CommandLine => "command line / environment",
        }
    }
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Login response data.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// Authenticated user.
    pub user: User,
    /// Whether the token reached persistent storage.
    pub token_persisted: bool,
}

impl LoginResponse {
    /// Creates new login response.
    #[must_use]
    pub const fn new(user: User, token_persisted: bool) -> Self {
        Self {
            user,
            token_persisted,
        }
    }
}
