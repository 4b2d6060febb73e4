//! Matrix `/sync` response decoding.
//!
//! Only the subset of the response the application renders is modelled:
//! joined rooms, their state and timeline events, and of those only
//! `m.room.message` and `m.room.name`. Everything else is skipped.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::{ClientError, MessageEvent, ProtocolEvent, RoomRenameEvent, SyncBatch};

const MESSAGE_EVENT: &str = "m.room.message";
const NAME_EVENT: &str = "m.room.name";
const MILLIS_PER_SECOND: i64 = 1000;

/// Wire shape of a `/sync` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncResponse {
    /// Token for the next incremental sync.
    pub next_batch: String,
    /// Per-room updates.
    #[serde(default)]
    pub rooms: Rooms,
}

/// Room updates grouped by membership.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rooms {
    /// Rooms the user is joined to, keyed by room id.
    #[serde(default)]
    pub join: BTreeMap<String, JoinedRoom>,
}

/// Updates for one joined room.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinedRoom {
    /// State events preceding the timeline.
    #[serde(default)]
    pub state: EventList,
    /// Timeline events, oldest first.
    #[serde(default)]
    pub timeline: EventList,
}

/// A list of raw events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventList {
    /// Events in server order.
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// Untyped client event.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    /// Event type, e.g. `m.room.message`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Sender user id.
    #[serde(default)]
    pub sender: String,
    /// Server timestamp in milliseconds.
    #[serde(default)]
    pub origin_server_ts: i64,
    /// Event content, shape depends on `kind`.
    #[serde(default)]
    pub content: Value,
}

impl SyncResponse {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, ClientError> {
        serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Flatten into protocol events.
    ///
    /// Within a room, state events come before timeline events so a room is
    /// named before its first message is delivered. Rooms are visited in id
    /// order.
    pub fn into_batch(self) -> SyncBatch {
        let mut events = Vec::new();

        for (room_id, room) in self.rooms.join {
            let raw = room.state.events.into_iter().chain(room.timeline.events);
            events.extend(raw.filter_map(|event| decode_event(&room_id, event)));
        }

        SyncBatch { next_batch: self.next_batch, events }
    }
}

/// Translate one raw event. `None` for event types the UI does not show.
fn decode_event(room_id: &str, event: RawEvent) -> Option<ProtocolEvent> {
    match event.kind.as_str() {
        MESSAGE_EVENT => {
            // Redacted messages carry no body
            let body = event.content.get("body")?.as_str()?;
            Some(ProtocolEvent::Message(MessageEvent {
                room_id: room_id.to_owned(),
                sender_id: event.sender,
                timestamp_unix: event.origin_server_ts.div_euclid(MILLIS_PER_SECOND),
                body: body.to_owned(),
            }))
        },
        NAME_EVENT => {
            let name = event.content.get("name").and_then(Value::as_str).unwrap_or_default();
            Some(ProtocolEvent::RoomRename(RoomRenameEvent {
                room_id: room_id.to_owned(),
                name: name.to_owned(),
            }))
        },
        _ => None,
    }
}
