//! Status bar
//!
//! Displays the focus mode and either the latest status message or key help.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use trellis_app::{App, Focus};

use crate::Theme;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mode = match app.focus() {
        Focus::Navigate => " NAVIGATE ",
        Focus::Compose => " COMPOSE ",
    };

    let detail = match app.status_message() {
        Some(message) if app.last_error().is_some_and(|e| message.ends_with(e)) => {
            Span::styled(message.to_owned(), theme.error)
        },
        Some(message) => Span::raw(message.to_owned()),
        None => Span::raw(app.keymap().help()),
    };

    let status_line = Line::from(vec![Span::styled(mode, theme.mode), Span::raw(" "), detail]);
    let paragraph = Paragraph::new(status_line).style(theme.status);

    frame.render_widget(paragraph, area);
}
