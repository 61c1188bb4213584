use crate::signaling::SignalingService;
use axum::Json;
use axum::extract::State;
use babycam_core::ClientConfig;

/// `GET /api/config`: ICE servers and share-link origins for the browser.
pub async fn config_handler(State(service): State<SignalingService>) -> Json<ClientConfig> {
    Json(service.client_config())
}
