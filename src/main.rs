use std::sync::Arc;

use fleet_store::api;
use fleet_store::config::{Config, LogFormat};
use fleet_store::engine::gps_refresh::run_gps_refresh;
use fleet_store::error::AppError;
use fleet_store::geo::LocationSampler;
use fleet_store::persistence::FileBlobStore;
use fleet_store::state::AppState;
use tokio::sync::watch;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }

    let sampler = match config.gps_seed {
        Some(seed) => LocationSampler::from_seed(seed),
        None => LocationSampler::from_entropy(),
    };
    let blob = Arc::new(FileBlobStore::new(config.data_dir.clone()));
    let shared_state = Arc::new(AppState::load(
        blob.clone(),
        sampler,
        config.seed_demo_data,
        config.event_buffer_size,
    )?);

    tracing::info!(data_dir = %blob.dir().display(), "fleet store ready");

    let app = api::rest::router(shared_state.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresh_task = tokio::spawn(run_gps_refresh(
        shared_state.clone(),
        Duration::from_secs(config.gps_refresh_secs),
        shutdown_rx,
    ));

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, "http server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    let _ = shutdown_tx.send(true);
    if let Err(err) = refresh_task.await {
        tracing::error!(error = %err, "gps refresh task panicked");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
