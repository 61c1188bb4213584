use crate::error::CoordinatorError;
use crate::room::{Coordinator, CoordinatorCommand, RoomSnapshot};
use crate::signaling::SignalingOutput;
use babycam_core::{
    ConnectionId, HostJoinAck, HostJoinRequest, RoomId, SignalKind, ViewerJoinAck,
    ViewerJoinRequest,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

pub const COMMAND_BUFFER: usize = 256;

/// Cloneable front door to a running [`Coordinator`].
#[derive(Clone)]
pub struct CoordinatorHandle {
    command_tx: mpsc::Sender<CoordinatorCommand>,
}

impl CoordinatorHandle {
    pub fn new(command_tx: mpsc::Sender<CoordinatorCommand>) -> Self {
        Self { command_tx }
    }

    /// A handle plus the receiver a [`Coordinator`] should be built on. Used
    /// when the output needs the handle before the coordinator exists.
    pub fn channel() -> (Self, mpsc::Receiver<CoordinatorCommand>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        (Self::new(command_tx), command_rx)
    }

    /// Starts a coordinator task delivering through `signaling`.
    pub fn spawn(signaling: Arc<dyn SignalingOutput>) -> Self {
        let (handle, command_rx) = Self::channel();
        tokio::spawn(Coordinator::new(command_rx, signaling).run());
        handle
    }

    async fn send(&self, cmd: CoordinatorCommand) -> Result<(), CoordinatorError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| CoordinatorError::Closed)
    }

    pub async fn claim_host(
        &self,
        connection_id: ConnectionId,
        request: HostJoinRequest,
        ack: Option<u64>,
    ) -> Result<HostJoinAck, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(CoordinatorCommand::HostJoin {
            connection_id,
            request,
            ack,
            reply,
        })
        .await?;
        rx.await.map_err(|_| CoordinatorError::Closed)
    }

    pub async fn claim_viewer(
        &self,
        connection_id: ConnectionId,
        request: ViewerJoinRequest,
        ack: Option<u64>,
    ) -> Result<ViewerJoinAck, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(CoordinatorCommand::ViewerJoin {
            connection_id,
            request,
            ack,
            reply,
        })
        .await?;
        rx.await.map_err(|_| CoordinatorError::Closed)
    }

    pub async fn leave(&self, connection_id: ConnectionId) -> Result<(), CoordinatorError> {
        self.send(CoordinatorCommand::Leave { connection_id }).await
    }

    pub async fn relay(
        &self,
        from: ConnectionId,
        to: ConnectionId,
        kind: SignalKind,
        payload: Value,
    ) -> Result<(), CoordinatorError> {
        self.send(CoordinatorCommand::Relay {
            from,
            to,
            kind,
            payload,
        })
        .await
    }

    /// Resolves once every binding held by the connection has been released.
    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), CoordinatorError> {
        let (done, rx) = oneshot::channel();
        self.send(CoordinatorCommand::Disconnect {
            connection_id,
            done,
        })
        .await?;
        rx.await.map_err(|_| CoordinatorError::Closed)
    }

    pub async fn room_snapshot(
        &self,
        room_id: RoomId,
    ) -> Result<Option<RoomSnapshot>, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(CoordinatorCommand::Inspect { room_id, reply })
            .await?;
        rx.await.map_err(|_| CoordinatorError::Closed)
    }

    pub async fn room_count(&self) -> Result<usize, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(CoordinatorCommand::CountRooms { reply }).await?;
        rx.await.map_err(|_| CoordinatorError::Closed)
    }
}
