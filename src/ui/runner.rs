//! Router construction and server entry point.

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get, post},
};
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, ui::handler, ui::signal, ui::state::AppState};

/// Top-level server failure.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the application router over a prepared state.
///
/// Exposed separately from [`run`] so tests can drive the router against
/// their own state and port.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handler::health_check))
        .route("/api/notifications/stream", get(handler::notification_stream))
        .route("/api/notifications", post(handler::publish_notification))
        .route("/api/visitors/track", post(handler::track_visitor))
        .route("/api/visitors/active", get(handler::active_visitors))
        .route("/ws", any(handler::presence_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(signal::shutdown_signal())
        .await?;

    Ok(())
}
