//! On-disk TOML configuration.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory on this platform")]
    NoConfigDir,

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A single `config.toml` file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Uses `config.toml` in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` when the platform has no home
    /// directory to derive it from.
    pub fn discover() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(|dir| Self::at(dir.join(CONFIG_FILE_NAME)))
            .ok_or(ConfigError::NoConfigDir)
    }

    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration.
    ///
    /// A missing file is written out with defaults so users have something to
    /// edit. A file that does not parse is left alone and defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the defaults cannot
    /// be written.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Writing default configuration");
                let config = AppConfig::default();
                self.save(&config)?;
                return Ok(config);
            }
            Err(e) => return Err(ConfigError::io(&self.path, e)),
        };

        toml::from_str(&content).or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Ignoring malformed configuration");
            Ok(AppConfig::default())
        })
    }

    /// Writes the configuration through a temporary file in the same
    /// directory, so a crash never leaves a truncated file behind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on serialization or I/O failure.
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;
        let mut staged =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| ConfigError::io(dir, e))?;
        staged
            .write_all(content.as_bytes())
            .map_err(|e| ConfigError::io(staged.path(), e))?;
        staged
            .persist(&self.path)
            .map_err(|e| ConfigError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), "Configuration saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::TokenStorageKind;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("workshops").join(CONFIG_FILE_NAME));

        let config = store.load().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3000/api");

        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("api_base_url"));
        assert!(written.contains("[ui]"));
    }

    #[test]
    fn test_malformed_file_is_left_untouched() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join(CONFIG_FILE_NAME));
        fs::write(store.path(), "invalid_toml = [").unwrap();

        let config = store.load().unwrap();

        assert_eq!(config.token_storage, TokenStorageKind::Keyring);
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "invalid_toml = ["
        );
    }

    #[test]
    fn test_existing_values_are_read() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("custom.toml"));
        fs::write(store.path(), "token_storage = \"file\"\n").unwrap();

        let config = store.load().unwrap();

        assert_eq!(config.token_storage, TokenStorageKind::File);
    }

    #[test]
    fn test_written_defaults_load_back_unchanged() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join(CONFIG_FILE_NAME));

        let first = store.load().unwrap();
        let second = store.load().unwrap();

        assert_eq!(first.api_base_url, second.api_base_url);
        assert_eq!(first.ui, second.ui);
    }

    #[test]
    fn test_unreadable_path_reports_io_error() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path());

        assert!(matches!(store.load(), Err(ConfigError::Io { .. })));
    }
}
