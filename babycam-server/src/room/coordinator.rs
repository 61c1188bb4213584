use crate::room::{CoordinatorCommand, Outbox, Room, RoomRegistry};
use crate::signaling::SignalingOutput;
use babycam_core::{Ack, AckReply, ConnectionId, HostJoinAck, ServerEvent, ViewerJoinAck};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Single owner of the room table. Commands are applied one at a time, so
/// claims, leaves and relays never interleave.
pub struct Coordinator {
    registry: RoomRegistry,
    command_rx: mpsc::Receiver<CoordinatorCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Coordinator {
    pub fn new(
        command_rx: mpsc::Receiver<CoordinatorCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            registry: RoomRegistry::new(),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Coordinator event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Coordinator event loop finished");
    }

    async fn handle_command(&mut self, cmd: CoordinatorCommand) {
        let mut outbox = Outbox::default();

        match cmd {
            CoordinatorCommand::HostJoin {
                connection_id,
                request,
                ack,
                reply,
            } => {
                let result = self
                    .registry
                    .claim_host(&connection_id, &request, &mut outbox);
                match &result {
                    Ok(granted) => info!(
                        "{} is hosting ({:?}, {} viewers waiting)",
                        connection_id, granted.mode, granted.viewer_count
                    ),
                    Err(e) => info!("Host claim from {} refused: {}", connection_id, e.code()),
                }

                let host_ack = HostJoinAck::from(result);
                self.acknowledge(&connection_id, ack, AckReply::HostJoin(host_ack.clone()))
                    .await;
                self.flush(outbox).await;
                let _ = reply.send(host_ack);
            }

            CoordinatorCommand::ViewerJoin {
                connection_id,
                request,
                ack,
                reply,
            } => {
                let result = self
                    .registry
                    .claim_viewer(&connection_id, &request, &mut outbox);
                match &result {
                    Ok(granted) => info!(
                        "{} is viewing (host online: {})",
                        connection_id,
                        granted.host_id.is_some()
                    ),
                    Err(e) => info!(
                        "Viewer claim from {} refused: {}",
                        connection_id,
                        e.code()
                    ),
                }

                let viewer_ack = ViewerJoinAck::from(result);
                self.acknowledge(&connection_id, ack, AckReply::ViewerJoin(viewer_ack.clone()))
                    .await;
                self.flush(outbox).await;
                let _ = reply.send(viewer_ack);
            }

            CoordinatorCommand::Leave { connection_id } => {
                if self.registry.leave(&connection_id, &mut outbox) {
                    info!("{} left its room", connection_id);
                }
                self.flush(outbox).await;
            }

            CoordinatorCommand::Relay {
                from,
                to,
                kind,
                payload,
            } => {
                if self.registry.relay(&from, &to, kind, payload, &mut outbox) {
                    debug!("Relaying {} from {} to {}", kind.event(), from, to);
                } else {
                    debug!("Dropping {} from {} to {}", kind.event(), from, to);
                }
                self.flush(outbox).await;
            }

            CoordinatorCommand::Disconnect {
                connection_id,
                done,
            } => {
                if self.registry.leave(&connection_id, &mut outbox) {
                    info!("{} disconnected, binding released", connection_id);
                }
                self.flush(outbox).await;
                let _ = done.send(());
            }

            CoordinatorCommand::Inspect { room_id, reply } => {
                let _ = reply.send(self.registry.room(&room_id).map(Room::snapshot));
            }

            CoordinatorCommand::CountRooms { reply } => {
                let _ = reply.send(self.registry.room_count());
            }
        }
    }

    async fn acknowledge(&self, connection_id: &ConnectionId, ack: Option<u64>, reply: AckReply) {
        let Some(id) = ack else {
            return;
        };
        self.signaling
            .deliver(connection_id, ServerEvent::Ack(Ack { id, reply }))
            .await;
    }

    async fn flush(&self, outbox: Outbox) {
        for delivery in outbox {
            self.signaling.deliver(&delivery.to, delivery.event).await;
        }
    }
}
