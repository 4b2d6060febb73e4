//! Single-line message composer.

use super::Component;
use crate::KeyInput;

/// Maximum message length, in characters.
pub const CHAR_LIMIT: usize = 280;

/// Hint shown while the composer is empty.
pub const PLACEHOLDER: &str = "Send a message...";

/// Text buffer with a character-indexed cursor.
///
/// Keys are ignored while the composer is not focused.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    value: String,
    cursor: usize,
    focused: bool,
}

impl Composer {
    /// Create an empty, unfocused composer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the text, truncated to [`CHAR_LIMIT`]. The cursor moves to
    /// the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().take(CHAR_LIMIT).collect();
        self.cursor = self.char_count();
    }

    /// Clear the text.
    pub fn reset(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Take the text, leaving the composer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    /// Whether there is no text.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether keys are accepted.
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Accept keys.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Ignore keys.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value.char_indices().nth(char_index).map_or(self.value.len(), |(i, _)| i)
    }

    fn insert(&mut self, c: char) {
        if self.char_count() >= CHAR_LIMIT {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn delete_before(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    fn delete_at(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }
}

impl Component for Composer {
    fn handle_key(&mut self, key: KeyInput) -> bool {
        if !self.focused {
            return false;
        }
        match key {
            KeyInput::Char(c) => self.insert(c),
            KeyInput::Backspace => self.delete_before(),
            KeyInput::Delete => self.delete_at(),
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.char_count(),
            _ => return false,
        }
        true
    }
}
