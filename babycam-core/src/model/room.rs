use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved room for unauthenticated same-network sessions.
pub const LOCAL_ROOM_ID: &str = "local";

pub const MAX_ROOM_ID_LEN: usize = 64;
pub const MAX_ACCESS_KEY_LEN: usize = 64;
pub const MIN_ACCESS_KEY_LEN: usize = 8;

/// Normalized room name: lower-case `[a-z0-9-]`, at most 64 chars, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Returns `None` when nothing survives normalization.
    pub fn sanitize(raw: &str) -> Option<Self> {
        let id: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'))
            .take(MAX_ROOM_ID_LEN)
            .collect();

        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn local() -> Self {
        Self(LOCAL_ROOM_ID.to_string())
    }

    pub fn is_local(&self) -> bool {
        self.0 == LOCAL_ROOM_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared secret gating a secure room. May be empty when supplied by a viewer.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey(String);

impl AccessKey {
    pub fn sanitize(raw: &str) -> Self {
        Self(
            raw.trim()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
                .take(MAX_ACCESS_KEY_LEN)
                .collect(),
        )
    }

    pub fn is_strong_enough(&self) -> bool {
        self.0.len() >= MIN_ACCESS_KEY_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessKey").field(&"***").finish()
    }
}
