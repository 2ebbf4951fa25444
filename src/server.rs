//! HTTP server initialization and runtime setup.
//!
//! Handles link store selection and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::LinkStore;
use crate::infrastructure::store::{MemoryLinkStore, RedisLinkStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens the configured link store.
///
/// With Redis configured, a failed connection is fatal: serving from an
/// empty in-memory store would answer 404 for every existing link.
///
/// # Errors
///
/// Returns an error if Redis is configured but unreachable.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    match &config.redis_url {
        Some(redis_url) => {
            let store = RedisLinkStore::connect(redis_url)
                .await
                .context("Failed to connect to Redis link store")?;
            tracing::info!("Link store: Redis");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("REDIS_URL not set, links are kept in memory and lost on restart");
            Ok(Arc::new(MemoryLinkStore::new()))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (Redis or in-memory)
/// - Services and shared state
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Redis connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;

    let state = AppState::new(store, config.site_settings(), &config.admin_key);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
