//! Session store: the authenticated flag and the token behind it.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info};

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;

/// Shared session state backed by a persisted token.
///
/// Cloning shares the same session; every screen and use case observes the
/// same flag.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStoragePort>,
    token: Arc<RwLock<Option<AuthToken>>>,
}

impl SessionStore {
    /// Creates an anonymous session over a token store.
    #[must_use]
    pub fn new(storage: Arc<dyn TokenStoragePort>) -> Self {
        Self {
            storage,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns whether a session token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Returns the current token, if any.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.token.read().clone()
    }

    /// Takes a token without persisting it, e.g. one restored at startup.
    pub fn adopt(&self, token: AuthToken) {
        debug!(token = %token, "Adopting session token");
        *self.token.write() = Some(token);
    }

    /// Persists a freshly issued token and marks the session authenticated.
    ///
    /// A storage failure is logged and the session still becomes
    /// authenticated for this run. Returns whether the token was persisted.
    pub async fn establish(&self, token: AuthToken) -> bool {
        let persisted = match self.storage.store_token(&token).await {
            Ok(()) => {
                info!("Session token persisted");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to persist session token");
                false
            }
        };

        *self.token.write() = Some(token);
        persisted
    }

    /// Ends the session. The in-memory flag is cleared even when the stored
    /// token cannot be deleted.
    ///
    /// # Errors
    /// Returns error if the persisted token cannot be deleted.
    pub async fn end(&self) -> Result<(), StorageError> {
        self.token.write().take();
        self.storage.delete_token().await
    }

    /// Reads the persisted token.
    ///
    /// # Errors
    /// Returns error if the token store cannot be read.
    pub async fn stored_token(&self) -> Result<Option<AuthToken>, StorageError> {
        self.storage.get_token().await
    }
}
