//! Token storage adapters.

mod file_storage;
mod keyring_storage;

use std::sync::Arc;

pub use file_storage::FileTokenStorage;
pub use keyring_storage::KeyringTokenStorage;

use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;
use crate::infrastructure::config::TokenStoreKind;

/// Builds the configured token store.
///
/// # Errors
/// Returns error if the file store cannot determine its data directory.
pub fn build_token_storage(
    kind: TokenStoreKind,
) -> Result<Arc<dyn TokenStoragePort>, StorageError> {
    match kind {
        TokenStoreKind::File => Ok(Arc::new(FileTokenStorage::new()?)),
        TokenStoreKind::Keyring => Ok(Arc::new(KeyringTokenStorage::new())),
    }
}
