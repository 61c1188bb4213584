use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::http::config_handler;
use crate::room::{Coordinator, CoordinatorHandle};
use crate::signaling::{SignalingService, ws_handler};
use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Wires a fresh coordinator to a signaling service and returns the app.
/// Must be called inside a tokio runtime.
pub fn build_router(config: ServerConfig) -> Router {
    let (coordinator, command_rx) = CoordinatorHandle::channel();
    let signaling = SignalingService::new(coordinator, Arc::new(config));

    tokio::spawn(Coordinator::new(command_rx, Arc::new(signaling.clone())).run());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/api/config", get(config_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(signaling)
}

pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr();
    let listener = match TcpListener::bind(addr.as_str()).await {
        Ok(listener) => listener,
        Err(source) => return Err(ServerError::Bind { addr, source }),
    };

    serve_on(listener, config).await
}

pub async fn serve_on(listener: TcpListener, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(config);

    if let Ok(addr) = listener.local_addr() {
        info!("Signaling server listening on http://{}", addr);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
