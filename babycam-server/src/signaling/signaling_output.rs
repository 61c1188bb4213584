use babycam_core::{ConnectionId, ServerEvent};
use async_trait::async_trait;

/// Outbound side of the signaling channel, implemented by whatever owns the
/// client sockets. The coordinator only ever talks to clients through this.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Push one event to one connection. Unknown connections are ignored.
    async fn deliver(&self, connection_id: &ConnectionId, event: ServerEvent);
}
