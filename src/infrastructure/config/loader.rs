//! Locating and loading `config.toml`, writing one on first run.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;
use super::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use crate::infrastructure::atomic_file::{FileAccess, write_atomically};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    DirNotFound,
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Finds the config file and turns it into a usable [`AppConfig`].
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Uses the platform config directory.
    ///
    /// # Errors
    /// Returns `ConfigError::DirNotFound` if no home directory is known.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir()))
            .ok_or(ConfigError::DirNotFound)
    }

    #[must_use]
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// The file `load` reads: the override when given, else `config.toml`
    /// in the config directory.
    #[must_use]
    pub fn config_path(&self, path_override: Option<&Path>) -> PathBuf {
        path_override.map_or_else(|| self.config_dir.join(CONFIG_FILE_NAME), Path::to_path_buf)
    }

    /// Loads and normalizes the configuration.
    ///
    /// A missing file is written with defaults. A malformed one is left
    /// untouched and defaults are used for this run.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read, or if the
    /// default file cannot be written.
    pub fn load(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = self.config_path(path_override);

        let mut config = match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), "Read config file");
                parse_or_default(&path, &content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "No config file, writing defaults");
                let config = AppConfig::default();
                let content = toml::to_string_pretty(&config)?;
                write_atomically(&path, content.as_bytes(), FileAccess::Shared).map_err(
                    |source| ConfigError::Write {
                        path: path.clone(),
                        source,
                    },
                )?;
                config
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        config.normalize();
        config.config = Some(path);
        Ok(config)
    }
}

fn parse_or_default(path: &Path, content: &str) -> AppConfig {
    toml::from_str(content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Malformed config file, using defaults");
        AppConfig::default()
    })
}
