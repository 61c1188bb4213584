use crate::error::CoordinatorError;
use crate::signaling::SignalingService;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use babycam_core::{ClientFrame, ClientMessage, ConnectionId};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    let connection_id = ConnectionId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, connection_id, service))
}

async fn handle_socket(socket: WebSocket, connection_id: ConnectionId, service: SignalingService) {
    info!("New signaling connection: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_connection(connection_id.clone(), tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();
        let connection_id = connection_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        let parsed =
                            ClientFrame::parse(text.as_str()).and_then(ClientFrame::into_message);
                        let (message, ack) = match parsed {
                            Ok(parsed) => parsed,
                            Err(e) => {
                                warn!("Invalid frame from {}: {}", connection_id, e);
                                continue;
                            }
                        };

                        if let Err(e) = dispatch(&service, &connection_id, message, ack).await {
                            error!("Dropping connection {}: {}", connection_id, e);
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    if let Err(e) = service.coordinator().disconnect(connection_id.clone()).await {
        error!("Failed to release {}: {}", connection_id, e);
    }
    service.remove_connection(&connection_id);
    info!("Signaling connection closed: {}", connection_id);
}

async fn dispatch(
    service: &SignalingService,
    connection_id: &ConnectionId,
    message: ClientMessage,
    ack: Option<u64>,
) -> Result<(), CoordinatorError> {
    let coordinator = service.coordinator();

    match message {
        ClientMessage::HostJoin(request) => {
            coordinator
                .claim_host(connection_id.clone(), request, ack)
                .await?;
        }
        ClientMessage::ViewerJoin(request) => {
            coordinator
                .claim_viewer(connection_id.clone(), request, ack)
                .await?;
        }
        ClientMessage::HostLeave | ClientMessage::ViewerLeave => {
            coordinator.leave(connection_id.clone()).await?;
        }
        ClientMessage::Signal(envelope) => {
            let kind = envelope.kind;
            match envelope.into_route() {
                Some((to, payload)) => {
                    coordinator
                        .relay(connection_id.clone(), to, kind, payload)
                        .await?;
                }
                None => debug!("Dropping incomplete {} from {}", kind.event(), connection_id),
            }
        }
    }

    Ok(())
}
