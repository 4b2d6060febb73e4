//! Room and message storage.
//!
//! [`RoomStore`] is the single owner of everything the client has learned
//! about rooms: their display names, the order they were first seen in, and
//! the formatted transcript lines of each room. Insertion and lookup only;
//! rooms are never removed.

use std::{collections::HashMap, fmt};

use chrono::DateTime;
use trellis_client::RoomId;

/// Clock format used for transcript timestamps (`3:04PM`).
const TIME_FORMAT: &str = "%-I:%M%p";

/// A room as shown in the room list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEntry {
    /// Stable room id.
    pub id: RoomId,
    /// Last announced name. Empty until the room is named.
    pub display_name: String,
}

impl RoomEntry {
    /// Text to show for this room: its name, or its id while unnamed.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() { &self.id } else { &self.display_name }
    }
}

/// One formatted transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLine {
    /// Clock time (UTC) the message was sent at.
    pub time: String,
    /// Sender display string.
    pub sender: String,
    /// Message text.
    pub body: String,
}

impl MessageLine {
    /// Format a message received at `timestamp` (seconds since the epoch).
    pub fn new(sender: impl Into<String>, timestamp: i64, body: impl Into<String>) -> Self {
        Self { time: format_time(timestamp), sender: sender.into(), body: body.into() }
    }

    /// The `time <sender>` prefix without the body.
    pub fn header(&self) -> String {
        format!("{} <{}>", self.time, self.sender)
    }
}

impl fmt::Display for MessageLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {}", self.time, self.sender, self.body)
    }
}

fn format_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map_or_else(|| "--:--".to_owned(), |t| t.format(TIME_FORMAT).to_string())
}

/// Per-room names, display order and transcripts.
///
/// The display order is first-seen order: a room keeps the position it was
/// given on its first `upsert_room` or `append_message`, even when renamed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomStore {
    index: HashMap<RoomId, usize>,
    order: Vec<RoomEntry>,
    transcripts: Vec<Vec<MessageLine>>,
}

impl RoomStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a room or replace its display name.
    ///
    /// Returns `true` if the room was not known before.
    pub fn upsert_room(&mut self, room_id: &str, name: &str) -> bool {
        match self.index.get(room_id) {
            Some(&position) => {
                self.order[position].display_name = name.to_owned();
                false
            },
            None => {
                self.insert(room_id, name);
                true
            },
        }
    }

    /// Append a line to a room's transcript.
    ///
    /// A room that has never been announced is created with an empty name.
    /// Returns `true` if the room was created by this call.
    pub fn append_message(&mut self, room_id: &str, line: MessageLine) -> bool {
        let (position, created) = match self.index.get(room_id) {
            Some(&position) => (position, false),
            None => (self.insert(room_id, ""), true),
        };
        self.transcripts[position].push(line);
        created
    }

    /// Transcript of a room, oldest first. Unknown rooms have none.
    pub fn lines_for(&self, room_id: &str) -> &[MessageLine] {
        self.index.get(room_id).map_or(&[], |&position| self.transcripts[position].as_slice())
    }

    /// All rooms in display order.
    pub fn display_order(&self) -> &[RoomEntry] {
        &self.order
    }

    /// Display name of a room, if known.
    pub fn display_name(&self, room_id: &str) -> Option<&str> {
        self.index.get(room_id).map(|&position| self.order[position].display_name.as_str())
    }

    /// Whether the room is known.
    pub fn contains(&self, room_id: &str) -> bool {
        self.index.contains_key(room_id)
    }

    /// Number of known rooms.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no room is known yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, room_id: &str, name: &str) -> usize {
        let position = self.order.len();
        self.index.insert(room_id.to_owned(), position);
        self.order.push(RoomEntry { id: room_id.to_owned(), display_name: name.to_owned() });
        self.transcripts.push(Vec::new());
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(store: &RoomStore) -> Vec<&str> {
        store.display_order().iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn rename_keeps_position() {
        let mut store = RoomStore::new();
        assert!(store.upsert_room("!a", "Alpha"));
        assert!(store.upsert_room("!b", "Beta"));
        assert!(!store.upsert_room("!a", "Aleph"));

        assert_eq!(ids(&store), vec!["!a", "!b"]);
        assert_eq!(store.display_name("!a"), Some("Aleph"));
    }

    #[test]
    fn message_for_unknown_room_creates_it() {
        let mut store = RoomStore::new();
        assert!(store.append_message("!x", MessageLine::new("@a:hs", 0, "hi")));

        assert_eq!(ids(&store), vec!["!x"]);
        assert_eq!(store.display_name("!x"), Some(""));
        assert_eq!(store.lines_for("!x").len(), 1);
    }

    #[test]
    fn announce_after_message_keeps_transcript() {
        let mut store = RoomStore::new();
        store.append_message("!x", MessageLine::new("@a:hs", 0, "hi"));
        assert!(!store.upsert_room("!x", "Later"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.lines_for("!x")[0].body, "hi");
        assert_eq!(store.display_order()[0].label(), "Later");
    }

    #[test]
    fn transcripts_preserve_arrival_order() {
        let mut store = RoomStore::new();
        store.upsert_room("!a", "Alpha");
        store.append_message("!a", MessageLine::new("@b:hs", 100, "second"));
        store.append_message("!a", MessageLine::new("@a:hs", 50, "first"));

        let bodies: Vec<_> = store.lines_for("!a").iter().map(|l| l.body.as_str()).collect();
        assert_eq!(bodies, vec!["second", "first"]);
    }

    #[test]
    fn unknown_room_has_empty_transcript() {
        let store = RoomStore::new();
        assert!(store.lines_for("!nope").is_empty());
        assert!(!store.contains("!nope"));
        assert!(store.is_empty());
    }

    #[test]
    fn unnamed_room_labelled_by_id() {
        let entry = RoomEntry { id: "!x:hs".into(), display_name: String::new() };
        assert_eq!(entry.label(), "!x:hs");
    }

    #[test]
    fn line_formats_clock_sender_and_body() {
        // 1970-01-01 15:04:00 UTC
        let line = MessageLine::new("@a:hs", 15 * 3600 + 4 * 60, "hi");

        assert_eq!(line.time, "3:04PM");
        assert_eq!(line.header(), "3:04PM <@a:hs>");
        assert_eq!(line.to_string(), "3:04PM <@a:hs> hi");
    }

    #[test]
    fn out_of_range_timestamp_does_not_panic() {
        let line = MessageLine::new("@a:hs", i64::MAX, "hi");
        assert_eq!(line.time, "--:--");
    }
}
