//! Application configuration.

pub mod app_config;
pub mod args;
pub mod loader;

pub use app_config::{AppConfig, LogLevel, TokenStoreKind, UiConfig};
pub use args::CliArgs;
pub use loader::{ConfigError, ConfigLoader};

pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";
pub(crate) const APP_NAME: &str = "userdesk";
