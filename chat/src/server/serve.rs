//! HTTP server setup

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::options::ServerOptions;
use crate::errors::ChatError;
use crate::server::handlers::{
    analyze_handler, execute_handler, generate_handler, health_handler, history_handler,
    nodes_info_handler, status_handler, validate_handler,
};
use crate::server::state::ServerState;

/// Build the chat router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(health_handler))
        // Service info
        .route("/chat/status", get(status_handler))
        .route("/chat/nodes_info", get(nodes_info_handler))
        .route("/chat/history", get(history_handler))
        // Workflows
        .route("/chat/generate_workflow", post(generate_handler))
        .route("/chat/validate_workflow", post(validate_handler))
        .route("/chat/current_workflow", post(analyze_handler))
        .route("/chat/execute_workflow", post(execute_handler))
        // State and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn serve(
    options: &ServerOptions,
    state: Arc<ServerState>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<JoinHandle<Result<(), ChatError>>, ChatError> {
    let app = router(state);

    let addr = format!("{}:{}", options.host, options.port);
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ChatError::ServerError(format!("{}: {}", addr, e)))?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ChatError::ServerError(e.to_string()))
    });

    Ok(handle)
}
