use super::app_config::{LogLevel, TokenStorageKind};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "workshops",
    version,
    about = "Browse and book workshops from the terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Booking service base URL.
    #[arg(long, value_name = "URL", env = "WORKSHOPS_API_URL")]
    pub api_url: Option<String>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Where to keep the session credential.
    #[arg(long, value_enum)]
    pub token_storage: Option<TokenStorageKind>,
}
