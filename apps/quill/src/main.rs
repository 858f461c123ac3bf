use std::error::Error;

use clap::Parser;
use tracing::info;

mod cli;
mod data_dir;
mod dsn;

use quill_api::ApiState;
use quill_common::{GlobalConfig, GlobalConfigPatch};
use quill_core::services::UserService;
use quill_storage::CmsStorage;

use crate::cli::Cli;
use crate::data_dir::resolve_data_dir;
use crate::dsn::resolve_dsn;

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("quill failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(&cli.data_dir);
    let dsn = resolve_dsn(&cli.dsn, &data_dir)?;
    let storage = CmsStorage::connect(&dsn).await?;
    info!(dsn = %dsn, "db connected");
    storage.sync().await?;

    let config = load_config(&storage, &cli, &dsn).await?;
    info!(
        host = %config.host,
        port = config.port,
        base_url = %config.base_url,
        uploads_dir = %config.uploads_dir,
        provider = config.storage_provider.as_str(),
        "config loaded"
    );

    let users = UserService::new(storage.clone());
    users.seed_roles().await?;
    info!("default roles ensured");

    if let Err(err) = std::fs::create_dir_all(&config.uploads_dir) {
        tracing::warn!(dir = %config.uploads_dir, error = %err, "could not create uploads dir");
    }

    let bind = format!("{}:{}", config.host, config.port);
    let app = quill_api::app(ApiState::new(storage, config));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(addr = %bind, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// CLI > ENV > DB-persisted settings; the merged result is written back so
/// the next start without flags keeps behaving the same.
async fn load_config(
    storage: &CmsStorage,
    cli: &Cli,
    dsn: &str,
) -> Result<GlobalConfig, Box<dyn Error + Send + Sync>> {
    let mut layers = match storage.load_settings().await? {
        Some(stored) => {
            let stored: GlobalConfig = serde_json::from_value(stored)?;
            GlobalConfigPatch::from(stored)
        }
        None => GlobalConfigPatch::default(),
    };
    layers.overlay(cli::env_patch());
    layers.overlay(cli.as_patch());
    layers.dsn = Some(dsn.to_string());

    let config = layers.into_config()?;
    storage.save_settings(serde_json::to_value(&config)?).await?;
    Ok(config)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quill=info,sqlx=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}
