//! Rooms sidebar
//!
//! Displays known rooms in first-seen order with unread indicators. The
//! selected room is highlighted and prefixed with `> `.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use trellis_app::{App, Focus};

use crate::Theme;

const SELECTED_PREFIX: &str = "> ";
const UNREAD_MARKER: &str = " *";
const TITLE: &str = " Rooms ";

/// Render the rooms sidebar.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let room_list = app.room_list();

    let items: Vec<ListItem> = room_list
        .entries()
        .iter()
        .map(|entry| {
            let mut spans = vec![Span::raw(entry.label())];
            if app.is_unread(&entry.id) {
                spans.push(Span::styled(UNREAD_MARKER, theme.room_unread));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_for(app.focus() == Focus::Navigate))
        .title(TITLE);
    let list = List::new(items)
        .block(block)
        .highlight_symbol(SELECTED_PREFIX)
        .highlight_style(theme.room_selected);

    let selected = room_list.selected().map(|_| room_list.cursor());
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}
