//! HTTP server wiring.

use crate::api;
use crate::config::ServerConfig;
use crate::ids::UuidGenerator;
use crate::service::GameService;
use crate::store::InMemoryGameStore;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Builds the application with an in-memory store and UUID ids.
pub fn app() -> Router {
    let service = GameService::new(
        Arc::new(InMemoryGameStore::new()),
        Arc::new(UuidGenerator),
    );
    api::router(service)
}

/// Serves `app` on `listener` until `shutdown` resolves.
#[instrument(skip_all)]
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Server ready");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Binds to the configured address and serves until Ctrl-C.
#[instrument(skip(config), fields(addr = %config.bind_address()))]
pub async fn run(config: &ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    serve(listener, app(), shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
    }
}
