//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.
//!
//! Pane geometry comes from [`trellis_app::PaneLayout`], the same layout the
//! App wraps the transcript against.

mod chat;
mod input;
mod rooms;
mod status;

use ratatui::{Frame, layout::Rect};
use trellis_app::{App, Pane};

use crate::Theme;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let layout = app.layout();
    let screen = frame.area();

    rooms::render(frame, app, theme, clip(layout.rooms, screen));
    chat::render(frame, app, theme, clip(layout.transcript, screen));
    input::render(frame, app, theme, clip(layout.composer, screen));
    status::render(frame, app, theme, clip(layout.status, screen));
}

/// Convert a layout pane to a ratatui area, clipped to the screen.
fn clip(pane: Pane, screen: Rect) -> Rect {
    Rect::new(pane.x, pane.y, pane.width, pane.height).intersection(screen)
}
