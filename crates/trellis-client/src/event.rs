//! Protocol events produced by the remote service.

/// Opaque room identifier assigned by the homeserver (e.g. `!abc:example.org`).
pub type RoomId = String;

/// A text message posted to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    /// Room the message was posted to.
    pub room_id: RoomId,
    /// Fully qualified sender id (e.g. `@alice:example.org`).
    pub sender_id: String,
    /// Server receive time, seconds since the unix epoch.
    pub timestamp_unix: i64,
    /// Plain text body.
    pub body: String,
}

/// A room's human-readable name changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRenameEvent {
    /// Room whose name changed.
    pub room_id: RoomId,
    /// New display name. Empty when the name was removed.
    pub name: String,
}

/// Events the client surfaces from a sync response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolEvent {
    /// New message in a room.
    Message(MessageEvent),
    /// Room name set or changed.
    RoomRename(RoomRenameEvent),
}

impl ProtocolEvent {
    /// Room this event belongs to.
    pub fn room_id(&self) -> &str {
        match self {
            Self::Message(m) => &m.room_id,
            Self::RoomRename(r) => &r.room_id,
        }
    }
}

/// Events decoded from one sync response, in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncBatch {
    /// Token to pass as `since` on the next sync.
    pub next_batch: String,
    /// Decoded events, ordered as received.
    pub events: Vec<ProtocolEvent>,
}
