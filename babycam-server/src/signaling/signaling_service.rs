use crate::config::ServerConfig;
use crate::room::CoordinatorHandle;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use babycam_core::{ClientConfig, ConnectionId, ServerEvent};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
    config: Arc<ServerConfig>,
}

/// Owns the open WebSocket senders and forwards client requests to the
/// coordinator.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    coordinator: CoordinatorHandle,
}

impl SignalingService {
    pub fn new(coordinator: CoordinatorHandle, config: Arc<ServerConfig>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
                config,
            }),
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &CoordinatorHandle {
        &self.coordinator
    }

    pub fn client_config(&self) -> ClientConfig {
        self.inner.config.client_config()
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    pub fn add_connection(&self, connection_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.connections.insert(connection_id, tx);
    }

    pub fn remove_connection(&self, connection_id: &ConnectionId) {
        self.inner.connections.remove(connection_id);
    }

    pub fn send_event(&self, connection_id: &ConnectionId, event: &ServerEvent) {
        let Some(connection) = self.inner.connections.get(connection_id) else {
            warn!(
                "Attempted to send '{}' to disconnected connection {}",
                event.event(),
                connection_id
            );
            return;
        };

        match serde_json::to_string(event) {
            Ok(json) => {
                if let Err(e) = connection.send(Message::Text(json.into())) {
                    error!("Failed to send WS message to {}: {:?}", connection_id, e);
                }
            }
            Err(e) => error!("Failed to serialize '{}': {}", event.event(), e),
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn deliver(&self, connection_id: &ConnectionId, event: ServerEvent) {
        self.send_event(connection_id, &event);
    }
}
