//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard and resize events and ratatui for rendering.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use trellis_app::{App, AppEvent, Driver, KeyInput};
use trellis_client::ClientError;

use crate::{Theme, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Homeserver rejected or failed a request during startup.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// Log output could not be set up.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns raw mode and the alternate screen; both are restored on
/// [`Driver::stop`] or drop, whichever comes first.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    theme: Theme,
    active: bool,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    pub fn new(theme: Theme) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, theme, active: true })
    }

    fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        warn_on_error("disable raw mode", disable_raw_mode());
        warn_on_error("leave alternate screen", stdout().execute(LeaveAlternateScreen).map(|_| ()));
        warn_on_error("show cursor", self.terminal.show_cursor());
    }
}

/// Log a failed restore step. Returns `true` if the step failed.
fn warn_on_error(step: &str, result: io::Result<()>) -> bool {
    match result {
        Ok(()) => false,
        Err(e) => {
            tracing::warn!(error = %e, step, "Terminal restore step failed");
            true
        },
    }
}

/// Convert a crossterm key event to `KeyInput`.
///
/// Returns `None` for keys the application has no use for.
pub fn convert_key(event: KeyEvent) -> Option<KeyInput> {
    if event.modifiers.contains(KeyModifiers::CONTROL)
        && let KeyCode::Char(c) = event.code
    {
        return Some(KeyInput::Ctrl(c.to_ascii_lowercase()));
    }

    match event.code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Tab | KeyCode::BackTab => Some(KeyInput::Tab),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        KeyCode::PageUp => Some(KeyInput::PageUp),
        KeyCode::PageDown => Some(KeyInput::PageDown),
        _ => None,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        while let Some(event) = self.event_stream.next().await {
            match event? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(input) = convert_key(key) {
                        return Ok(Some(AppEvent::Key(input)));
                    }
                },
                Event::Resize(cols, rows) => return Ok(Some(AppEvent::Resize(cols, rows))),
                _ => {},
            }
        }
        Ok(None)
    }

    fn size(&self) -> Result<(u16, u16), Self::Error> {
        Ok(crossterm::terminal::size()?)
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let theme = &self.theme;
        self.terminal.draw(|frame| ui::render(frame, app, theme))?;
        Ok(())
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_is_quit_chord() {
        assert_eq!(
            convert_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyInput::Ctrl('c'))
        );
        assert_eq!(
            convert_key(key(KeyCode::Char('C'), KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
            Some(KeyInput::Ctrl('c'))
        );
    }

    #[test]
    fn shifted_char_is_printable() {
        assert_eq!(
            convert_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(KeyInput::Char('A'))
        );
    }

    #[test]
    fn navigation_keys_map() {
        assert_eq!(convert_key(key(KeyCode::Tab, KeyModifiers::NONE)), Some(KeyInput::Tab));
        assert_eq!(convert_key(key(KeyCode::PageUp, KeyModifiers::NONE)), Some(KeyInput::PageUp));
        assert_eq!(convert_key(key(KeyCode::Down, KeyModifiers::NONE)), Some(KeyInput::Down));
    }

    #[test]
    fn restore_failures_reported() {
        assert!(!warn_on_error("show cursor", Ok(())));
        assert!(warn_on_error("show cursor", Err(io::Error::other("not a tty"))));
    }

    #[test]
    fn unused_keys_dropped() {
        assert_eq!(convert_key(key(KeyCode::F(5), KeyModifiers::NONE)), None);
        assert_eq!(convert_key(key(KeyCode::Insert, KeyModifiers::NONE)), None);
    }
}
