//! Session bearer token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque bearer credential issued at login.
///
/// Never printed in full and wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AuthToken {
    value: String,
}

impl AuthToken {
    /// Creates a token, rejecting blank values.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let value = value.as_ref().trim();

        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self {
            value: value.to_string(),
        })
    }

    /// Creates token without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let len = self.value.chars().count();
        if len <= 10 {
            return "*".repeat(len);
        }

        let prefix: String = self.value.chars().take(4).collect();
        let suffix: String = self.value.chars().skip(len - 4).collect();
        format!("{prefix}...{suffix}")
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}
