//! # placesd — places daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize structured logging
//! - Open (and optionally create) the JSON document
//! - Construct the storage and media host adapters
//! - Construct the place service, injecting adapters via port traits
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use places_adapter_http_axum::router;
use places_adapter_http_axum::state::AppState;
use places_adapter_media_cloudinary::CloudinaryMediaHost;
use places_adapter_storage_json::JsonFilePlaceRepository;
use places_app::services::place_service::PlaceService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter)
                .with_context(|| format!("invalid log filter `{}`", config.logging.filter))?,
        )
        .init();

    // Storage
    let file = places_adapter_storage_json::Config {
        path: config.storage.path.clone(),
        create_if_missing: config.storage.create_if_missing,
    }
    .build()
    .await
    .with_context(|| format!("failed to open {}", config.storage.path.display()))?;
    tracing::info!(path = %file.path().display(), "using JSON document");
    let repo = JsonFilePlaceRepository::new(file);

    // Media host
    if !config.media.is_configured() {
        tracing::warn!("media host credentials missing, image uploads will fail");
    }
    let media = CloudinaryMediaHost::new(config.media.clone())
        .context("failed to build media host client")?;

    // HTTP
    let state = AppState::new(PlaceService::new(repo, media));
    let app = router::build(state, config.http.max_body_bytes);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "placesd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("placesd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
