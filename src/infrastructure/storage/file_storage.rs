//! File-based token storage: the terminal counterpart of the `token` cookie.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;
use crate::infrastructure::atomic_file::{FileAccess, write_atomically};
use crate::infrastructure::config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};

const TOKEN_FILE_NAME: &str = "token";

/// Stores the session token in a single file under the data directory.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Creates storage at `<data_dir>/token`.
    ///
    /// # Errors
    /// Returns error if the data directory cannot be determined.
    pub fn new() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).ok_or_else(|| {
            StorageError::NotAvailable("failed to determine data directory".to_string())
        })?;

        Ok(Self::with_path(dirs.data_dir().join(TOKEN_FILE_NAME)))
    }

    /// Creates storage at an explicit path.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the token file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStoragePort for FileTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        debug!(path = %self.path.display(), "Reading token file");

        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(AuthToken::new(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No token file present");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to read token file");
                Err(StorageError::RetrievalFailed(e.to_string()))
            }
        }
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), "Writing token file");

        write_atomically(&self.path, token.as_str().as_bytes(), FileAccess::OwnerOnly).map_err(|e| {
            warn!(error = %e, "Failed to write token file");
            StorageError::StorageFailed(e.to_string())
        })
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Token file deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No token file to delete");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete token file");
                Err(StorageError::DeletionFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_means_no_token() {
        let dir = tempdir().unwrap();
        let storage = FileTokenStorage::with_path(dir.path().join("token"));

        assert!(storage.get_token().await.unwrap().is_none());
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_store_and_retrieve_token() {
        let dir = tempdir().unwrap();
        let storage = FileTokenStorage::with_path(dir.path().join("nested").join("token"));
        let token = AuthToken::new_unchecked("header.payload.signature");

        storage.store_token(&token).await.unwrap();

        let retrieved = storage.get_token().await.unwrap().unwrap();
        assert_eq!(retrieved.as_str(), token.as_str());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let storage = FileTokenStorage::with_path(dir.path().join("token"));
        storage
            .store_token(&AuthToken::new_unchecked("header.payload.signature"))
            .await
            .unwrap();

        let mode = std::fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = FileTokenStorage::with_path(dir.path().join("token"));
        storage
            .store_token(&AuthToken::new_unchecked("header.payload.signature"))
            .await
            .unwrap();

        storage.delete_token().await.unwrap();
        storage.delete_token().await.unwrap();

        assert!(storage.get_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_file_means_no_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "\n").unwrap();

        let storage = FileTokenStorage::with_path(path);
        assert!(storage.get_token().await.unwrap().is_none());
    }
}
