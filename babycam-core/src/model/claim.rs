use crate::model::connection::ConnectionId;
use crate::model::room::{AccessKey, RoomId};
use crate::model::signaling::{HostJoinRequest, ViewerJoinRequest};
use serde::Serialize;
use thiserror::Error;

/// Why a role claim was refused. Serialized as the snake_case wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ClaimError {
    #[error("room id is empty or reserved")]
    RoomInvalid,
    #[error("room already has a host")]
    RoomBusy,
    #[error("access key is too short")]
    KeyInvalid,
    #[error("room has no host and no viewers")]
    RoomOffline,
    #[error("access key does not match")]
    Unauthorized,
}

impl ClaimError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::RoomInvalid => "room_invalid",
            Self::RoomBusy => "room_busy",
            Self::KeyInvalid => "key_invalid",
            Self::RoomOffline => "room_offline",
            Self::Unauthorized => "unauthorized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    Local,
    Secure,
}

impl HostMode {
    /// Anything but the exact string `secure` means local.
    pub fn from_wire(mode: Option<&str>) -> Self {
        match mode {
            Some("secure") => Self::Secure,
            _ => Self::Local,
        }
    }
}

/// A validated `host:join`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostClaim {
    pub mode: HostMode,
    pub room_id: RoomId,
    /// Present exactly when `mode` is secure.
    pub access_key: Option<AccessKey>,
}

impl HostClaim {
    pub fn from_request(request: &HostJoinRequest) -> Result<Self, ClaimError> {
        let mode = HostMode::from_wire(request.mode.as_deref());

        if mode == HostMode::Local {
            return Ok(Self {
                mode,
                room_id: RoomId::local(),
                access_key: None,
            });
        }

        let room_id = request
            .room_id
            .as_deref()
            .and_then(RoomId::sanitize)
            .filter(|id| !id.is_local())
            .ok_or(ClaimError::RoomInvalid)?;

        let access_key = AccessKey::sanitize(request.access_key.as_deref().unwrap_or_default());
        if !access_key.is_strong_enough() {
            return Err(ClaimError::KeyInvalid);
        }

        Ok(Self {
            mode,
            room_id,
            access_key: Some(access_key),
        })
    }
}

/// A normalized `viewer:join`. Viewer input can always be normalized; the
/// room and key checks happen against the live room table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerClaim {
    pub room_id: RoomId,
    pub access_key: AccessKey,
}

impl ViewerClaim {
    pub fn from_request(request: &ViewerJoinRequest) -> Self {
        let room_id = request
            .room_id
            .as_deref()
            .and_then(RoomId::sanitize)
            .unwrap_or_else(RoomId::local);

        Self {
            room_id,
            access_key: AccessKey::sanitize(request.access_key.as_deref().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostGranted {
    pub viewer_count: usize,
    pub mode: HostMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerGranted {
    pub host_id: Option<ConnectionId>,
    pub secure: bool,
}
