//! Infrastructure layer with external service adapters.

/// Booking service HTTP client.
pub mod api;
/// Application configuration.
pub mod config;
/// Token storage adapters.
pub mod storage;

pub use api::{BookingApiClient, DEFAULT_API_BASE};
pub use config::{AppConfig, CliArgs, ConfigStore, LogLevel, TokenStorageKind};
pub use storage::{FileTokenStorage, KeyringTokenStorage, token_storage};
