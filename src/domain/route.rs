//! Navigable routes.
//!
//! Routes keep the path shape of the web client they replace so that deep
//! links such as `/users/edit/3` can be passed on the command line.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::entities::UserId;

/// What a route requires of the session before it may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Renders regardless of session state.
    Public,
    /// Renders only with a session token.
    RequiresAuth,
    /// Renders only without a session token.
    RequiresAnonymous,
}

/// A screen the application can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Home,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/users`
    Users,
    /// `/users/create`
    UserCreate,
    /// `/users/edit/:id`
    UserEdit(UserId),
}

/// Path that does not name any route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl Route {
    /// Parses a path such as `/users/edit/3`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        if !trimmed.is_empty() && !trimmed.starts_with('/') {
            return None;
        }

        match segments.as_slice() {
            [] => Some(Self::Home),
            ["login"] => Some(Self::Login),
            ["register"] => Some(Self::Register),
            ["users"] => Some(Self::Users),
            ["users", "create"] => Some(Self::UserCreate),
            ["users", "edit", id] if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => {
                id.parse().ok().map(Self::UserEdit)
            }
            _ => None,
        }
    }

    /// Returns the path this route is addressed by.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Users => "/users".to_string(),
            Self::UserCreate => "/users/create".to_string(),
            Self::UserEdit(id) => format!("/users/edit/{id}"),
        }
    }

    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Home => Access::Public,
            Self::Login | Self::Register => Access::RequiresAnonymous,
            Self::Users | Self::UserCreate | Self::UserEdit(_) => Access::RequiresAuth,
        }
    }

    /// Screen title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Users => "Users",
            Self::UserCreate => "Add New User",
            Self::UserEdit(_) => "Edit User",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRoute(s.to_string()))
    }
}
