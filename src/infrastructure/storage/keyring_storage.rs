//! Keyring-based token storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;

const KEYRING_SERVICE: &str = "userdesk";
const KEYRING_USER: &str = "token";

/// Keeps the session token in the platform secret store.
pub struct KeyringTokenStorage {
    service: String,
    user: String,
}

impl KeyringTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::with_names(KEYRING_SERVICE, KEYRING_USER)
    }

    /// Uses a custom service/user pair, e.g. to keep test runs apart.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    /// Runs `op` against the entry on the blocking pool; platform keyrings
    /// do synchronous IPC.
    async fn call<T, F>(&self, op: F) -> Result<keyring::Result<T>, StorageError>
    where
        F: FnOnce(&Entry) -> keyring::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let service = self.service.clone();
        let user = self.user.clone();

        tokio::task::spawn_blocking(move || Entry::new(&service, &user).and_then(|entry| op(&entry)))
            .await
            .map_err(|e| StorageError::AccessFailed(format!("keyring task failed: {e}")))
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// A missing entry is an empty store, not a failure.
fn absent_as_none<T>(result: keyring::Result<T>) -> keyring::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        debug!(service = %self.service, "Reading token from keyring");

        let secret = self
            .call(|entry| absent_as_none(entry.get_password().map(Zeroizing::new)))
            .await?
            .map_err(|e| {
                warn!(error = %e, "Failed to read token from keyring");
                StorageError::RetrievalFailed(e.to_string())
            })?;

        let Some(secret) = secret else {
            debug!("No token in keyring");
            return Ok(None);
        };

        let token = AuthToken::new(secret.as_str());
        match &token {
            Some(token) => debug!(token = %token, "Token found in keyring"),
            None => warn!("Keyring entry holds a blank token"),
        }
        Ok(token)
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        let secret = Zeroizing::new(token.as_str().to_owned());

        self.call(move |entry| entry.set_password(&secret))
            .await?
            .map_err(|e| {
                warn!(error = %e, "Failed to write token to keyring");
                StorageError::StorageFailed(e.to_string())
            })?;

        debug!(service = %self.service, token = %token, "Token stored in keyring");
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        let removed = self
            .call(|entry| absent_as_none(entry.delete_credential()))
            .await?
            .map_err(|e| {
                warn!(error = %e, "Failed to delete token from keyring");
                StorageError::DeletionFailed(e.to_string())
            })?;

        if removed.is_some() {
            debug!("Token deleted from keyring");
        } else {
            debug!("No keyring token to delete");
        }
        Ok(())
    }
}
