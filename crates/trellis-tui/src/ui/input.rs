//! Input line
//!
//! Displays the composer with its cursor, scrolled horizontally so the
//! cursor stays inside the pane.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use trellis_app::{App, Focus, widgets::PLACEHOLDER};
use unicode_width::UnicodeWidthChar;

use crate::Theme;

/// Render the input line.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let composer = app.composer();
    let focused = app.focus() == Focus::Compose;

    let block = Block::default().borders(Borders::ALL).border_style(theme.border_for(focused));
    let inner = block.inner(area);
    let window = Window::new(composer.value(), composer.cursor(), usize::from(inner.width));

    let text = if composer.is_empty() {
        Line::from(Span::styled(PLACEHOLDER, theme.hint))
    } else {
        Line::from(window.visible)
    };

    frame.render_widget(Paragraph::new(text).block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let cursor_x = inner.x.saturating_add(window.cursor_column as u16);
        frame.set_cursor_position((cursor_x, inner.y));
    }
}

/// The slice of a draft that fits in the pane, measured in display columns.
#[derive(Debug, PartialEq, Eq)]
struct Window {
    visible: String,
    cursor_column: usize,
}

impl Window {
    /// Scroll so the cursor sits at most on the last column.
    fn new(value: &str, cursor: usize, width: usize) -> Self {
        let chars: Vec<char> = value.chars().collect();
        let cursor = cursor.min(chars.len());

        let budget = width.saturating_sub(1);
        let mut start = cursor;
        let mut cursor_column = 0;
        while start > 0 {
            let w = char_width(chars[start - 1]);
            if cursor_column + w > budget {
                break;
            }
            cursor_column += w;
            start -= 1;
        }

        let mut used = 0;
        let visible = chars[start..]
            .iter()
            .take_while(|&&c| {
                used += char_width(c);
                used <= width
            })
            .collect();

        Self { visible, cursor_column }
    }
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}
