//! Widget state models.
//!
//! Each widget owns its own state and key handling; the renderer draws it
//! from its accessors. [`crate::App`] composes them and decides which one a
//! key is routed to.

mod composer;
mod room_list;
mod transcript;

pub use composer::{CHAR_LIMIT, Composer, PLACEHOLDER};
pub use room_list::RoomList;
pub use transcript::{Transcript, TranscriptRow, WELCOME};

use crate::KeyInput;

/// A widget that handles its own keys.
pub trait Component {
    /// Apply a key. Returns `true` if the widget consumed it.
    fn handle_key(&mut self, key: KeyInput) -> bool;
}
