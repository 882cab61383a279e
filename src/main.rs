use std::fs::OpenOptions;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use workshops_tui::application::SessionStore;
use workshops_tui::infrastructure::{
    AppConfig, BookingApiClient, CliArgs, ConfigStore, token_storage,
};
use workshops_tui::presentation::App;

/// Sends tracing output to the log file. The terminal belongs to the UI, so
/// without a log path nothing is recorded.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(log_path) = config.effective_log_path() else {
        return Ok(());
    };

    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)
            .wrap_err_with(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .wrap_err_with(|| format!("opening log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(file).with_ansi(false))
        .init();

    info!(path = %log_path.display(), "Logging initialized");
    Ok(())
}

fn load_config(args: CliArgs) -> Result<AppConfig> {
    let store = match &args.config {
        Some(path) => ConfigStore::at(path),
        None => ConfigStore::discover()?,
    };
    let mut config = store.load()?;
    config.merge_with_args(args);
    Ok(config)
}

/// The session store starts out `Initializing`; the app reads the stored
/// credential once the first frame is on screen.
fn create_app(config: AppConfig) -> Result<App> {
    let api = Arc::new(BookingApiClient::with_base_url(config.api_base_url.as_str())?);
    let session = Arc::new(SessionStore::new(token_storage(config.token_storage)));

    Ok(App::new(api, session, config.ui))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env file: {e}");
        }
    }

    let config = load_config(CliArgs::parse())?;
    init_logging(&config)?;
    info!(
        version = workshops_tui::VERSION,
        api = %config.api_base_url,
        storage = ?config.token_storage,
        "Starting {}",
        workshops_tui::NAME
    );

    let app = create_app(config)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    if let Err(e) = &result {
        warn!(error = %e, "Application exited with error");
    }
    result
}
