use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::ws;
use crate::config::Config;
use crate::queue::QueueRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: QueueRegistry,
    pub keepalive_interval: Duration,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/rooms", get(handlers::list_rooms))
        .route("/api/rooms/{room}/queue", get(handlers::queue))
        .route("/api/rooms/{room}/position", get(handlers::position))
        .route("/api/rooms/{room}/join", post(handlers::join))
        .route("/api/rooms/{room}/leave", post(handlers::leave))
        .route("/ws/{room}", get(ws::ws_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<()> {
    let state = Arc::new(AppState {
        registry: QueueRegistry::new(config.rooms.iter().cloned()),
        keepalive_interval: config.keepalive_interval,
    });

    let app = router(state);

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;

    tracing::info!(addr = %config.addr, rooms = ?config.rooms, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
