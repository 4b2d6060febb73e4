//! Selectable room list.

use super::Component;
use crate::{KeyInput, RoomEntry};

/// Room entries with a cursor clamped to their bounds.
///
/// An empty list has no selection.
#[derive(Debug, Clone, Default)]
pub struct RoomList {
    entries: Vec<RoomEntry>,
    cursor: usize,
}

impl RoomList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entries, keeping the cursor position where possible.
    pub fn set_entries(&mut self, entries: &[RoomEntry]) {
        self.entries = entries.to_vec();
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[RoomEntry] {
        &self.entries
    }

    /// Cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entry under the cursor, or `None` if the list is empty.
    pub fn selected(&self) -> Option<&RoomEntry> {
        self.entries.get(self.cursor)
    }

    /// Move down one entry. Returns `false` at the last entry.
    pub fn select_next(&mut self) -> bool {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move up one entry. Returns `false` at the first entry.
    pub fn select_prev(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to the first entry.
    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    /// Jump to the last entry.
    pub fn select_last(&mut self) {
        self.cursor = self.entries.len().saturating_sub(1);
    }
}

impl Component for RoomList {
    fn handle_key(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Up => {
                self.select_prev();
            },
            KeyInput::Down => {
                self.select_next();
            },
            KeyInput::Home => self.select_first(),
            KeyInput::End => self.select_last(),
            _ => return false,
        }
        true
    }
}
