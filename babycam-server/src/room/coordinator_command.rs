use crate::room::RoomSnapshot;
use babycam_core::{
    ConnectionId, HostJoinAck, HostJoinRequest, RoomId, SignalKind, ViewerJoinAck,
    ViewerJoinRequest,
};
use serde_json::Value;
use tokio::sync::oneshot;

/// Commands fed to the coordinator by the signaling layer.
#[derive(Debug)]
pub enum CoordinatorCommand {
    /// `host:join`. `ack` is the client's correlation id, if it asked for one.
    HostJoin {
        connection_id: ConnectionId,
        request: HostJoinRequest,
        ack: Option<u64>,
        reply: oneshot::Sender<HostJoinAck>,
    },

    /// `viewer:join`.
    ViewerJoin {
        connection_id: ConnectionId,
        request: ViewerJoinRequest,
        ack: Option<u64>,
        reply: oneshot::Sender<ViewerJoinAck>,
    },

    /// `host:leave` or `viewer:leave`.
    Leave { connection_id: ConnectionId },

    /// `signal:offer`, `signal:answer` or `signal:candidate`.
    Relay {
        from: ConnectionId,
        to: ConnectionId,
        kind: SignalKind,
        payload: Value,
    },

    /// The channel is gone. `done` fires once its binding is released.
    Disconnect {
        connection_id: ConnectionId,
        done: oneshot::Sender<()>,
    },

    Inspect {
        room_id: RoomId,
        reply: oneshot::Sender<Option<RoomSnapshot>>,
    },

    CountRooms { reply: oneshot::Sender<usize> },
}
