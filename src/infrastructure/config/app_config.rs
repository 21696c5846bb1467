//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use super::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use crate::infrastructure::api::DEFAULT_API_BASE;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where the session token is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    /// A `token` file in the data directory.
    #[default]
    File,
    /// The system keyring.
    Keyring,
}

/// Application configuration, loaded from TOML and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Base URL of the API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Token persistence backend.
    #[serde(default)]
    pub token_store: TokenStoreKind,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Shortest request timeout the client accepts; zero would fail every call.
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

const fn default_request_timeout() -> u64 {
    30
}

fn default_accent_color() -> String {
    "Cyan".to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = &args.api_url {
            self.api_url.clone_from(api_url);
        }
        if let Some(timeout) = args.timeout {
            self.request_timeout_secs = timeout;
        }
        if let Some(token_store) = args.token_store {
            self.token_store = token_store;
        }
        if let Some(accent_color) = &args.accent_color {
            self.ui.accent_color.clone_from(accent_color);
        }
        self.normalize();
    }

    /// Raises a too-short timeout and trims the API URL.
    pub fn normalize(&mut self) {
        if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS {
            warn!(
                configured = self.request_timeout_secs,
                minimum = MIN_REQUEST_TIMEOUT_SECS,
                "Request timeout too short, using minimum"
            );
            self.request_timeout_secs = MIN_REQUEST_TIMEOUT_SECS;
        }

        let api_url = self.api_url.trim().trim_end_matches('/');
        if api_url.is_empty() {
            warn!("Empty api_url, using default");
            self.api_url = default_api_url();
        } else if api_url.len() != self.api_url.len() {
            self.api_url = api_url.to_string();
        }
    }

    /// Returns the request timeout, never shorter than the minimum.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        let secs = if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS {
            MIN_REQUEST_TIMEOUT_SECS
        } else {
            self.request_timeout_secs
        };
        Duration::from_secs(secs)
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("userdesk.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            log_level: LogLevel::Info,
            token_store: TokenStoreKind::File,
            ui: UiConfig::default(),
        }
    }
}
