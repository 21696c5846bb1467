//! Infrastructure layer with external service adapters.

/// HTTP client for the user-management API.
pub mod api;
/// Application configuration.
pub mod config;
/// Token storage adapters.
pub mod storage;

pub(crate) mod atomic_file;

pub use api::ApiClient;
pub use config::{AppConfig, CliArgs, LogLevel, ConfigLoader, TokenStoreKind};
pub use storage::{FileTokenStorage, KeyringTokenStorage, build_token_storage};
