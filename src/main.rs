use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use userdesk::infrastructure::{
    ApiClient, AppConfig, CliArgs, ConfigLoader, build_token_storage,
};
use userdesk::presentation::{App, Theme};

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

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = ConfigLoader::new()?.load(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_app(config: &AppConfig) -> Result<App> {
    let api_client = std::sync::Arc::new(ApiClient::with_base_url(
        config.api_url.as_str(),
        config.request_timeout(),
    )?);
    let token_storage = build_token_storage(config.token_store)?;

    info!(
        api_url = %api_client.base_url(),
        token_store = ?config.token_store,
        "Adapters ready"
    );

    Ok(App::new(
        api_client.clone(),
        api_client,
        token_storage,
        Theme::new(&config.ui.accent_color),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let dotenv = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;
    info!(version = userdesk::VERSION, "Starting {}", userdesk::NAME);
    if let Err(e) = dotenv
        && !e.not_found()
    {
        warn!(error = %e, "Failed to load .env file");
    }

    let app = create_app(&config)?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal, args.token.clone(), args.route).await;

    ratatui::restore();

    result
}
