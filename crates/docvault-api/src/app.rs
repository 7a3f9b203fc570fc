//! Application builder and server lifecycle.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use docvault_cache::{TtlCache, spawn_sweeper};
use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::Repositories;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Run the server until `shutdown` resolves, then drain and release
/// the store.
pub async fn run_server<S>(config: AppConfig, shutdown: S) -> AppResult<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    info!(backend = %config.database.backend, "Opening document store");
    let repos = Repositories::connect(&config.database).await?;

    let cache = Arc::new(TtlCache::new(config.cache.lifespan()));
    info!(lifespan_secs = cache.lifespan().as_secs(), "Token cache initialized");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = config
        .cache
        .sweep_interval()
        .map(|interval| spawn_sweeper(Arc::clone(&cache), interval, shutdown_rx));

    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, repos.clone(), cache)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(address = %addr, "docvault listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutdown signal received, draining connections");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    if let Some(handle) = sweeper {
        if tokio::time::timeout(grace, handle).await.is_err() {
            warn!("Cache sweeper did not stop within the grace period");
        }
    }
    repos.close().await;
    info!("docvault shut down");

    served
}
