//! Scrollable transcript viewport.

use super::Component;
use crate::{KeyInput, MessageLine};

/// Shown while the selected room has no messages.
pub const WELCOME: &str = "Welcome to Matrix!";

/// One wrapped screen row of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRow {
    /// Row text.
    pub text: String,
    /// Byte length of the `time <sender>` prefix on this row. Zero once the
    /// prefix has been fully shown on earlier rows.
    pub header_len: usize,
}

/// Message lines wrapped to the pane width, with a row scroll offset.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<MessageLine>,
    rows: Vec<TranscriptRow>,
    width: u16,
    height: u16,
    offset: usize,
}

impl Transcript {
    /// Create an empty transcript with a zero-sized viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content and rewrap it.
    pub fn set_lines(&mut self, lines: &[MessageLine]) {
        self.lines = lines.to_vec();
        self.rewrap();
    }

    /// Append one line.
    pub fn push(&mut self, line: MessageLine) {
        let rows = wrap_line(&line, self.width);
        self.rows.extend(rows);
        self.lines.push(line);
    }

    /// Change the viewport size and rewrap. A view that was at the bottom
    /// stays at the bottom.
    pub fn resize(&mut self, width: u16, height: u16) {
        let was_at_bottom = self.at_bottom();
        self.width = width;
        self.height = height;
        self.rewrap();
        if was_at_bottom {
            self.goto_bottom();
        }
    }

    /// Scroll so the last row is visible.
    pub fn goto_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll towards older rows.
    pub fn scroll_up(&mut self, rows: usize) {
        self.offset = self.offset.saturating_sub(rows);
    }

    /// Scroll towards newer rows, stopping at the bottom.
    pub fn scroll_down(&mut self, rows: usize) {
        self.offset = self.offset.saturating_add(rows).min(self.max_offset());
    }

    /// Whether the last row is visible.
    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Rows inside the viewport.
    pub fn visible_rows(&self) -> &[TranscriptRow] {
        let end = self.offset.saturating_add(usize::from(self.height)).min(self.rows.len());
        &self.rows[self.offset.min(end)..end]
    }

    /// Source lines, oldest first.
    pub fn lines(&self) -> &[MessageLine] {
        &self.lines
    }

    /// All wrapped rows.
    pub fn rows(&self) -> &[TranscriptRow] {
        &self.rows
    }

    /// Index of the first visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn page(&self) -> usize {
        usize::from(self.height.max(1))
    }

    fn max_offset(&self) -> usize {
        self.rows.len().saturating_sub(usize::from(self.height))
    }

    fn rewrap(&mut self) {
        self.rows = self.lines.iter().flat_map(|line| wrap_line(line, self.width)).collect();
        self.offset = self.offset.min(self.max_offset());
    }
}

impl Component for Transcript {
    fn handle_key(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::PageUp => self.scroll_up(self.page()),
            KeyInput::PageDown => self.scroll_down(self.page()),
            _ => return false,
        }
        true
    }
}

fn wrap_line(line: &MessageLine, width: u16) -> Vec<TranscriptRow> {
    let full = line.to_string();
    let header_end = line.header().len();

    // Rows are slices of `full` with break whitespace dropped; locate each
    // one to know how much of the header it carries.
    let mut position = 0;
    textwrap::wrap(&full, usize::from(width.max(1)))
        .into_iter()
        .map(|row| {
            let start = match full[position..].find(row.as_ref()) {
                Some(i) => {
                    let start = position + i;
                    position = start + row.len();
                    start
                },
                None => position,
            };
            let header_len = char_floor(&row, header_end.saturating_sub(start));
            TranscriptRow { text: row.into_owned(), header_len }
        })
        .collect()
}

fn char_floor(s: &str, mut index: usize) -> usize {
    index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
