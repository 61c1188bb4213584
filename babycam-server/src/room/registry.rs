use crate::room::{Room, RoomAccess};
use babycam_core::{
    ClaimError, ConnectionId, HostClaim, HostGranted, HostJoinRequest, RoomId, ServerEvent,
    SignalKind, ViewerClaim, ViewerGranted, ViewerJoinRequest,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Host,
    Viewer,
}

/// The room and role a connection currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub room_id: RoomId,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: ConnectionId,
    pub event: ServerEvent,
}

/// Notifications produced by one registry operation, in emission order.
#[derive(Debug, Default)]
pub struct Outbox {
    deliveries: Vec<Delivery>,
}

impl Outbox {
    pub fn push(&mut self, to: ConnectionId, event: ServerEvent) {
        self.deliveries.push(Delivery { to, event });
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter()
    }
}

impl IntoIterator for Outbox {
    type Item = Delivery;
    type IntoIter = std::vec::IntoIter<Delivery>;

    fn into_iter(self) -> Self::IntoIter {
        self.deliveries.into_iter()
    }
}

/// In-memory room table plus the reverse index of connection bindings.
///
/// Both maps are only ever changed together, so a connection is bound to a
/// room exactly when that room lists it as host or viewer. Rooms disappear
/// as soon as they have neither.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
    bindings: HashMap<ConnectionId, Binding>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = (&RoomId, &Room)> {
        self.rooms.iter()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn binding(&self, connection_id: &ConnectionId) -> Option<&Binding> {
        self.bindings.get(connection_id)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&ConnectionId, &Binding)> {
        self.bindings.iter()
    }

    pub fn claim_host(
        &mut self,
        connection_id: &ConnectionId,
        request: &HostJoinRequest,
        outbox: &mut Outbox,
    ) -> Result<HostGranted, ClaimError> {
        let claim = HostClaim::from_request(request)?;

        if let Some(room) = self.rooms.get(&claim.room_id) {
            if room.host.as_ref().is_some_and(|host| host != connection_id) {
                return Err(ClaimError::RoomBusy);
            }
        }

        let previous = self.detach(connection_id, outbox);
        let HostClaim {
            mode,
            room_id,
            access_key,
        } = claim;

        let room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating room '{}'", room_id);
            Room::default()
        });

        if access_key.is_some() && !room.access.is_secure() && !room.viewers.is_empty() {
            info!(
                "Room '{}' is becoming secure, evicting {} viewers",
                room_id,
                room.viewers.len()
            );
            for viewer_id in room.viewers.drain() {
                self.bindings.remove(&viewer_id);
                outbox.push(viewer_id, ServerEvent::HostLeft);
            }
        }

        room.host = Some(connection_id.clone());
        room.access = match access_key {
            Some(key) => RoomAccess::Keyed(key),
            None => RoomAccess::Open,
        };

        for viewer_id in &room.viewers {
            outbox.push(
                connection_id.clone(),
                ServerEvent::ViewerJoined {
                    viewer_id: viewer_id.clone(),
                },
            );
            outbox.push(viewer_id.clone(), ServerEvent::HostOnline);
        }

        let granted = HostGranted {
            viewer_count: room.viewers.len(),
            mode,
        };

        self.bindings.insert(
            connection_id.clone(),
            Binding {
                room_id,
                role: Role::Host,
            },
        );

        if let Some(previous) = previous {
            self.collect(&previous);
        }

        Ok(granted)
    }

    pub fn claim_viewer(
        &mut self,
        connection_id: &ConnectionId,
        request: &ViewerJoinRequest,
        outbox: &mut Outbox,
    ) -> Result<ViewerGranted, ClaimError> {
        let ViewerClaim {
            room_id,
            access_key,
        } = ViewerClaim::from_request(request);

        match self.rooms.get(&room_id) {
            None if !room_id.is_local() => return Err(ClaimError::RoomOffline),
            Some(room) if !room.access.admits(&access_key) => {
                return Err(ClaimError::Unauthorized);
            }
            _ => {}
        }

        let previous = self.detach(connection_id, outbox);

        let room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating room '{}'", room_id);
            Room::default()
        });

        room.viewers.insert(connection_id.clone());

        if let Some(host_id) = &room.host {
            outbox.push(
                host_id.clone(),
                ServerEvent::ViewerJoined {
                    viewer_id: connection_id.clone(),
                },
            );
        }

        let granted = ViewerGranted {
            host_id: room.host.clone(),
            secure: room.access.is_secure(),
        };

        self.bindings.insert(
            connection_id.clone(),
            Binding {
                room_id,
                role: Role::Viewer,
            },
        );

        if let Some(previous) = previous {
            self.collect(&previous);
        }

        Ok(granted)
    }

    /// Releases whatever the connection holds. Returns `false` if it held nothing.
    pub fn leave(&mut self, connection_id: &ConnectionId, outbox: &mut Outbox) -> bool {
        match self.detach(connection_id, outbox) {
            Some(room_id) => {
                self.collect(&room_id);
                true
            }
            None => false,
        }
    }

    /// Queues the payload for `to` if both ends are bound to the same room.
    /// Returns whether it was routed.
    pub fn relay(
        &self,
        from: &ConnectionId,
        to: &ConnectionId,
        kind: SignalKind,
        payload: Value,
        outbox: &mut Outbox,
    ) -> bool {
        let (Some(sender), Some(target)) = (self.bindings.get(from), self.bindings.get(to)) else {
            return false;
        };
        if sender.room_id != target.room_id {
            return false;
        }

        outbox.push(to.clone(), ServerEvent::relayed(kind, from.clone(), payload));
        true
    }

    /// Unbinds without garbage-collecting the room, so a claim can re-enter
    /// the same room before it is considered empty.
    fn detach(&mut self, connection_id: &ConnectionId, outbox: &mut Outbox) -> Option<RoomId> {
        let binding = self.bindings.remove(connection_id)?;

        let Some(room) = self.rooms.get_mut(&binding.room_id) else {
            warn!(
                "Connection {} was bound to missing room '{}'",
                connection_id, binding.room_id
            );
            return None;
        };

        match binding.role {
            Role::Host => {
                if room.host.as_ref() == Some(connection_id) {
                    room.host = None;
                    for viewer_id in &room.viewers {
                        outbox.push(viewer_id.clone(), ServerEvent::HostLeft);
                    }
                }
            }
            Role::Viewer => {
                if room.viewers.remove(connection_id) {
                    if let Some(host_id) = &room.host {
                        outbox.push(
                            host_id.clone(),
                            ServerEvent::ViewerLeft {
                                viewer_id: connection_id.clone(),
                            },
                        );
                    }
                }
            }
        }

        Some(binding.room_id)
    }

    fn collect(&mut self, room_id: &RoomId) {
        if self.rooms.get(room_id).is_some_and(Room::is_empty) {
            self.rooms.remove(room_id);
            info!("Room '{}' is empty, removing", room_id);
        }
    }
}
