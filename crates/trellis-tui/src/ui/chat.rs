//! Chat area
//!
//! Displays the visible rows of the selected room's transcript.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use trellis_app::{App, widgets::WELCOME};

use crate::Theme;

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let title = app
        .room_list()
        .selected()
        .map_or_else(|| " Matrix ".to_owned(), |entry| format!(" {} ", entry.label()));

    let block = Block::default().borders(Borders::ALL).border_style(theme.border).title(title);

    let transcript = app.transcript();
    let lines: Vec<Line> = if transcript.is_empty() {
        vec![Line::from(Span::styled(WELCOME, theme.hint))]
    } else {
        transcript
            .visible_rows()
            .iter()
            .map(|row| {
                let (header, rest) = row.text.split_at(row.header_len);
                Line::from(vec![Span::styled(header, theme.sender), Span::styled(rest, theme.body)])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
