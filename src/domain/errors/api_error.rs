//! API call error types.

use thiserror::Error;

use super::StorageError;
use crate::domain::validation::ValidationErrors;

/// Failure of a call against the user-management API.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// Non-2xx response. `fields` holds the per-field messages from the
    /// response body's `data` object, empty when the body had none.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        status: u16,
        message: String,
        fields: ValidationErrors,
    },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("no session token available")]
    NotAuthenticated,

    #[error("token storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates rejection error.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>, fields: ValidationErrors) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
            fields,
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns server-reported field messages, empty for non-rejections.
    #[must_use]
    pub fn fields(&self) -> ValidationErrors {
        match self {
            Self::Rejected { fields, .. } => fields.clone(),
            _ => ValidationErrors::new(),
        }
    }

    /// Returns the flat message to show above a form.
    #[must_use]
    pub fn banner(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Network { message } => format!("Network error: {message}"),
            Self::NotAuthenticated => "You are not logged in.".to_string(),
            _ => self.to_string(),
        }
    }

    /// Returns HTTP status for rejections.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether the server refused the bearer token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}
