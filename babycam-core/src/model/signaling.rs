use crate::model::claim::{ClaimError, HostGranted, HostMode, ViewerGranted};
use crate::model::connection::ConnectionId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Event names used on the signaling channel.
pub mod events {
    pub const HOST_JOIN: &str = "host:join";
    pub const HOST_LEAVE: &str = "host:leave";
    pub const HOST_ONLINE: &str = "host:online";
    pub const HOST_LEFT: &str = "host:left";
    pub const VIEWER_JOIN: &str = "viewer:join";
    pub const VIEWER_LEAVE: &str = "viewer:leave";
    pub const VIEWER_JOINED: &str = "viewer:joined";
    pub const VIEWER_LEFT: &str = "viewer:left";
    pub const SIGNAL_OFFER: &str = "signal:offer";
    pub const SIGNAL_ANSWER: &str = "signal:answer";
    pub const SIGNAL_CANDIDATE: &str = "signal:candidate";
    pub const ACK: &str = "ack";
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Frame(#[source] serde_json::Error),
    #[error("invalid payload for '{event}': {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown event '{0}'")]
    UnknownEvent(String),
}

/// Non-string values are treated as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostJoinRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub room_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub access_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerJoinRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub room_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub access_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

impl SignalKind {
    pub fn from_event(event: &str) -> Option<Self> {
        match event {
            events::SIGNAL_OFFER => Some(Self::Offer),
            events::SIGNAL_ANSWER => Some(Self::Answer),
            events::SIGNAL_CANDIDATE => Some(Self::Candidate),
            _ => None,
        }
    }

    pub fn event(&self) -> &'static str {
        match self {
            Self::Offer => events::SIGNAL_OFFER,
            Self::Answer => events::SIGNAL_ANSWER,
            Self::Candidate => events::SIGNAL_CANDIDATE,
        }
    }
}

/// A relay request as received. Either half may be missing, in which case
/// the request is unroutable.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalEnvelope {
    pub kind: SignalKind,
    pub to: Option<ConnectionId>,
    pub payload: Option<Value>,
}

#[derive(Deserialize)]
struct RawSignal {
    #[serde(default, deserialize_with = "lenient_string")]
    to: Option<String>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    candidate: Option<Value>,
}

/// `null`, `false`, `0` and `""` count as a missing payload.
fn is_present(payload: &Value) -> bool {
    match payload {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl SignalEnvelope {
    fn decode(kind: SignalKind, data: Value) -> Result<Self, serde_json::Error> {
        let raw: RawSignal = serde_json::from_value(data)?;
        let payload = match kind {
            SignalKind::Candidate => raw.candidate,
            SignalKind::Offer | SignalKind::Answer => raw.description,
        };

        Ok(Self {
            kind,
            to: raw.to.and_then(|to| to.parse().ok()),
            payload: payload.filter(is_present),
        })
    }

    pub fn into_route(self) -> Option<(ConnectionId, Value)> {
        Some((self.to?, self.payload?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    HostJoin(HostJoinRequest),
    HostLeave,
    ViewerJoin(ViewerJoinRequest),
    ViewerLeave,
    Signal(SignalEnvelope),
}

impl ClientMessage {
    /// An absent or `null` payload decodes as an empty object.
    pub fn decode(event: &str, data: Value) -> Result<Self, ProtocolError> {
        let data = if data.is_null() {
            Value::Object(Default::default())
        } else {
            data
        };
        let payload_err = |source| ProtocolError::Payload {
            event: event.to_string(),
            source,
        };

        match event {
            events::HOST_JOIN => serde_json::from_value(data)
                .map(Self::HostJoin)
                .map_err(payload_err),
            events::HOST_LEAVE => Ok(Self::HostLeave),
            events::VIEWER_JOIN => serde_json::from_value(data)
                .map(Self::ViewerJoin)
                .map_err(payload_err),
            events::VIEWER_LEAVE => Ok(Self::ViewerLeave),
            other => match SignalKind::from_event(other) {
                Some(kind) => SignalEnvelope::decode(kind, data)
                    .map(Self::Signal)
                    .map_err(payload_err),
                None => Err(ProtocolError::UnknownEvent(other.to_string())),
            },
        }
    }
}

/// One text frame sent by a client: `{"event", "data"?, "ack"?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientFrame {
    pub event: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack: Option<u64>,
}

impl ClientFrame {
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Frame)
    }

    pub fn into_message(self) -> Result<(ClientMessage, Option<u64>), ProtocolError> {
        let message = ClientMessage::decode(&self.event, self.data)?;
        Ok((message, self.ack))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostJoinAck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ClaimError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<HostMode>,
}

impl From<Result<HostGranted, ClaimError>> for HostJoinAck {
    fn from(result: Result<HostGranted, ClaimError>) -> Self {
        match result {
            Ok(granted) => Self {
                ok: true,
                error: None,
                viewer_count: Some(granted.viewer_count),
                mode: Some(granted.mode),
            },
            Err(error) => Self {
                ok: false,
                error: Some(error),
                viewer_count: None,
                mode: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerJoinAck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ClaimError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_online: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_id: Option<ConnectionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
}

impl From<Result<ViewerGranted, ClaimError>> for ViewerJoinAck {
    fn from(result: Result<ViewerGranted, ClaimError>) -> Self {
        match result {
            Ok(granted) => Self {
                ok: true,
                error: None,
                host_online: Some(granted.host_id.is_some()),
                host_id: granted.host_id,
                secure: Some(granted.secure),
            },
            Err(error) => Self {
                ok: false,
                error: Some(error),
                host_online: None,
                host_id: None,
                secure: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AckReply {
    HostJoin(HostJoinAck),
    ViewerJoin(ViewerJoinAck),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub id: u64,
    #[serde(flatten)]
    pub reply: AckReply,
}

/// Everything the server pushes to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "ack")]
    Ack(Ack),
    #[serde(rename = "viewer:joined", rename_all = "camelCase")]
    ViewerJoined { viewer_id: ConnectionId },
    #[serde(rename = "viewer:left", rename_all = "camelCase")]
    ViewerLeft { viewer_id: ConnectionId },
    #[serde(rename = "host:online")]
    HostOnline,
    #[serde(rename = "host:left")]
    HostLeft,
    #[serde(rename = "signal:offer")]
    Offer {
        from: ConnectionId,
        description: Value,
    },
    #[serde(rename = "signal:answer")]
    Answer {
        from: ConnectionId,
        description: Value,
    },
    #[serde(rename = "signal:candidate")]
    Candidate { from: ConnectionId, candidate: Value },
}

impl ServerEvent {
    /// Wraps a relayed payload, untouched, under the event matching `kind`.
    pub fn relayed(kind: SignalKind, from: ConnectionId, payload: Value) -> Self {
        match kind {
            SignalKind::Offer => Self::Offer {
                from,
                description: payload,
            },
            SignalKind::Answer => Self::Answer {
                from,
                description: payload,
            },
            SignalKind::Candidate => Self::Candidate {
                from,
                candidate: payload,
            },
        }
    }

    pub fn event(&self) -> &'static str {
        match self {
            Self::Ack(_) => events::ACK,
            Self::ViewerJoined { .. } => events::VIEWER_JOINED,
            Self::ViewerLeft { .. } => events::VIEWER_LEFT,
            Self::HostOnline => events::HOST_ONLINE,
            Self::HostLeft => events::HOST_LEFT,
            Self::Offer { .. } => events::SIGNAL_OFFER,
            Self::Answer { .. } => events::SIGNAL_ANSWER,
            Self::Candidate { .. } => events::SIGNAL_CANDIDATE,
        }
    }
}
