use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use jobtrack::application::ReminderClock;
use jobtrack::domain::{ApiError, Session, TrackerPort};
use jobtrack::domain::keybinding::Keymap;
use jobtrack::infrastructure::{
    AppConfig, AuthApiClient, CliArgs, KeyringSessionStorage, StorageManager, TrackerApiClient,
};
use jobtrack::presentation::ui::{AppSettings, TrackerFactory};
use jobtrack::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn create_app() -> Result<(App, Option<String>)> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    let cli_token = config.token.clone();

    init_logging(&config)?;

    info!(
        version = jobtrack::VERSION,
        api = %config.api_base_url,
        "Starting {}",
        jobtrack::NAME
    );

    let api_settings = config.api_settings();
    let auth_client = Arc::new(AuthApiClient::new(&api_settings)?);
    let session_storage = Arc::new(KeyringSessionStorage::new());

    let tracker_factory: TrackerFactory = Arc::new(
        move |session: Session| -> Result<Arc<dyn TrackerPort>, ApiError> {
            Ok(Arc::new(TrackerApiClient::new(&api_settings, session)?))
        },
    );

    let settings = AppSettings {
        keymap: Keymap::with_overrides(&config.keybindings)?,
        clock: ReminderClock::from_config(config.ui.display_utc_offset_minutes),
        confirm_deletes: config.ui.confirm_deletes,
    };

    let app = App::new(auth_client, session_storage, tracker_factory, settings)
        .with_state_storage(storage);

    Ok((app, cli_token))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let (app, cli_token) = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal, cli_token).await;

    ratatui::restore();

    result
}
