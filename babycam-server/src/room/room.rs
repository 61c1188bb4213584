use babycam_core::{AccessKey, ConnectionId};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoomAccess {
    #[default]
    Open,
    Keyed(AccessKey),
}

impl RoomAccess {
    pub fn is_secure(&self) -> bool {
        matches!(self, Self::Keyed(_))
    }

    /// Open rooms admit anyone; keyed rooms need the exact key.
    pub fn admits(&self, key: &AccessKey) -> bool {
        match self {
            Self::Open => true,
            Self::Keyed(expected) => expected == key,
        }
    }
}

/// One signaling scope: at most one host, any number of viewers.
#[derive(Debug, Default)]
pub struct Room {
    pub(crate) host: Option<ConnectionId>,
    pub(crate) viewers: HashSet<ConnectionId>,
    pub(crate) access: RoomAccess,
}

impl Room {
    pub fn host(&self) -> Option<&ConnectionId> {
        self.host.as_ref()
    }

    pub fn viewers(&self) -> impl Iterator<Item = &ConnectionId> {
        self.viewers.iter()
    }

    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    pub fn has_viewer(&self, connection_id: &ConnectionId) -> bool {
        self.viewers.contains(connection_id)
    }

    pub fn is_secure(&self) -> bool {
        self.access.is_secure()
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_none() && self.viewers.is_empty()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        let mut viewers: Vec<_> = self.viewers.iter().cloned().collect();
        viewers.sort();

        RoomSnapshot {
            host: self.host.clone(),
            viewers,
            secure: self.is_secure(),
        }
    }
}

/// Point-in-time copy of a room, viewers sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub host: Option<ConnectionId>,
    pub viewers: Vec<ConnectionId>,
    pub secure: bool,
}
