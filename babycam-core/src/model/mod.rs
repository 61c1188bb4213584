mod claim;
mod config;
mod connection;
mod room;
mod signaling;

pub use claim::{ClaimError, HostClaim, HostGranted, HostMode, ViewerClaim, ViewerGranted};
pub use config::{ClientConfig, DEFAULT_STUN_URL, IceServerConfig};
pub use connection::ConnectionId;
pub use room::{
    AccessKey, LOCAL_ROOM_ID, MAX_ACCESS_KEY_LEN, MAX_ROOM_ID_LEN, MIN_ACCESS_KEY_LEN, RoomId,
};
pub use signaling::{
    Ack, AckReply, ClientFrame, ClientMessage, HostJoinAck, HostJoinRequest, ProtocolError,
    ServerEvent, SignalEnvelope, SignalKind, ViewerJoinAck, ViewerJoinRequest, events,
};
