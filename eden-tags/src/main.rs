//! eden-tags - Emotion tag service
//!
//! Stores and serves the emotion tags written by the Eden creation tool and
//! curation agent and read by the playback client.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eden_common::config::{
    default_config_path, read_toml_config, resolve_database_url, resolve_listen_addr,
};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eden_tags::{build_router, AppState, TagStore};

/// Command-line arguments for eden-tags
#[derive(Parser, Debug)]
#[command(name = "eden-tags")]
#[command(about = "Emotion tag storage service for Eden")]
#[command(version)]
struct Args {
    /// Address to listen on [env: EMOTION_LISTEN_ADDR] [default: 127.0.0.1:8000]
    #[arg(short, long)]
    listen: Option<String>,

    /// SQLite connection string [env: EMOTION_DB_URL]
    #[arg(short, long)]
    database_url: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "EDEN_TAGS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The logging level lives in the config file, so it is read first and
    // reported once the subscriber is installed
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let loaded_config = read_toml_config(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let config_found = loaded_config.is_some();
    let toml_config = loaded_config.unwrap_or_default();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| toml_config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Eden emotion tag service (eden-tags) v{}",
        env!("CARGO_PKG_VERSION")
    );
    if config_found {
        info!("Loaded config file: {}", config_path.display());
    } else {
        warn!("Config file not found: {} (using defaults)", config_path.display());
    }

    let database_url = resolve_database_url(args.database_url.as_deref(), &toml_config);
    let addr = resolve_listen_addr(args.listen.as_deref(), &toml_config)?;

    let pool = eden_common::db::connect(&database_url)
        .await
        .context("Failed to open tag database")?;
    let store = TagStore::open(pool)
        .await
        .context("Failed to initialize tag table")?;
    info!("✓ Tag store ready ({} tags)", store.count().await?);

    let app = build_router(AppState::new(store.clone()));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("eden-tags listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
