//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::infrastructure::api::DEFAULT_API_BASE;

/// Application name used for platform directories.
pub const APP_NAME: &str = "workshops";
/// Qualifier used for platform directories.
pub const APP_QUALIFIER: &str = "com";
/// Organization used for platform directories.
pub const APP_ORGANIZATION: &str = "workshops";

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

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
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

/// Where the session credential is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenStorageKind {
    /// System keyring.
    #[default]
    Keyring,
    /// Plain file in the data directory.
    File,
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Booking service base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Log file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Credential storage backend.
    #[serde(default)]
    pub token_storage: TokenStorageKind,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI timing configuration, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a failed booking message stays visible.
    #[serde(default = "default_booking_error_secs")]
    pub booking_error_secs: u64,

    /// Notification duration.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Delay before leaving the register screen after success.
    #[serde(default = "default_register_redirect_secs")]
    pub register_redirect_secs: u64,
}

impl UiConfig {
    #[must_use]
    pub const fn booking_error_display(&self) -> Duration {
        Duration::from_secs(self.booking_error_secs)
    }

    #[must_use]
    pub const fn notification_display(&self) -> Duration {
        Duration::from_secs(self.notification_duration)
    }

    #[must_use]
    pub const fn register_redirect_delay(&self) -> Duration {
        Duration::from_secs(self.register_redirect_secs)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            booking_error_secs: default_booking_error_secs(),
            notification_duration: default_notification_duration(),
            register_redirect_secs: default_register_redirect_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

const fn default_booking_error_secs() -> u64 {
    3
}

const fn default_notification_duration() -> u64 {
    5
}

const fn default_register_redirect_secs() -> u64 {
    2
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(api_url) = args.api_url {
            self.api_base_url = api_url;
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(token_storage) = args.token_storage {
            self.token_storage = token_storage;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("workshops.log"))
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
            api_base_url: default_api_base_url(),
            log_path: None,
            log_level: LogLevel::Info,
            token_storage: TokenStorageKind::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            api_base_url = "https://booking.example.com/api"
            token_storage = "file"

            [ui]
            booking_error_secs = 10
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.api_base_url, "https://booking.example.com/api");
        assert_eq!(config.token_storage, TokenStorageKind::File);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.ui.booking_error_secs, 10);
        assert_eq!(config.ui.notification_duration, 5);
        assert_eq!(config.ui.register_redirect_secs, 2);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.token_storage, TokenStorageKind::Keyring);
        assert_eq!(config.ui.booking_error_display(), Duration::from_secs(3));
        assert_eq!(config.ui.register_redirect_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_cli_args_override_file_values() {
        let mut config: AppConfig = toml::from_str(
            r#"
            api_base_url = "https://from-file.example.com"
            log_level = "warn"
            "#,
        )
        .unwrap();
        let args = CliArgs::parse_from([
            "workshops",
            "--api-url",
            "https://from-cli.example.com",
            "--token-storage",
            "file",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.api_base_url, "https://from-cli.example.com");
        assert_eq!(config.token_storage, TokenStorageKind::File);
        assert_eq!(config.log_level, LogLevel::Warn);
    }
}
