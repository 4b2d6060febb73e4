//! Application input events.
//!
//! This module defines [`AppEvent`], the closed set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize) from the terminal driver.
//! - Protocol notifications delivered by the ingestion [`crate::Bridge`].

use trellis_client::RoomId;

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Message received in a room.
    Message {
        /// Room the message belongs to.
        room_id: RoomId,
        /// Sender display string.
        sender: String,
        /// Server timestamp, seconds since the unix epoch.
        timestamp: i64,
        /// Plain text body.
        body: String,
    },

    /// Room announced or renamed.
    Room {
        /// Stable room id.
        room_id: RoomId,
        /// New display name.
        name: String,
    },

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Keyboard input.
    Key(KeyInput),

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}
