//! Color theme.

use ratatui::style::{Color, Modifier, Style};

/// Styles used by the renderer. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Pane border without focus.
    pub border: Style,
    /// Pane border of the focused pane.
    pub border_focused: Style,
    /// Selected room in the list.
    pub room_selected: Style,
    /// Room with unseen messages.
    pub room_unread: Style,
    /// Timestamp and sender prefix of a transcript line.
    pub sender: Style,
    /// Message text.
    pub body: Style,
    /// Dimmed hints: composer placeholder, welcome line.
    pub hint: Style,
    /// Status bar background.
    pub status: Style,
    /// Focus mode badge in the status bar.
    pub mode: Style,
    /// Error text in the status bar.
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Magenta),
            room_selected: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            room_unread: Style::default().fg(Color::Cyan),
            sender: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            body: Style::default(),
            hint: Style::default().fg(Color::DarkGray),
            status: Style::default().bg(Color::DarkGray).fg(Color::White),
            mode: Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// Border style for a pane.
    pub fn border_for(&self, focused: bool) -> Style {
        if focused { self.border_focused } else { self.border }
    }
}
