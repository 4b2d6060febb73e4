//! Reserved key bindings.

use crate::KeyInput;

/// Keys the state machine intercepts before forwarding to a widget.
///
/// Built once at startup and owned by [`crate::App`]; never mutated while
/// running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    /// Exit the application.
    pub quit: KeyInput,
    /// Switch between room navigation and message composition.
    pub toggle_focus: KeyInput,
    /// Send the composer contents (compose mode only).
    pub submit: KeyInput,
    /// Select the previous room (navigate mode only).
    pub nav_up: KeyInput,
    /// Select the next room (navigate mode only).
    pub nav_down: KeyInput,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            quit: KeyInput::Ctrl('c'),
            toggle_focus: KeyInput::Tab,
            submit: KeyInput::Enter,
            nav_up: KeyInput::Up,
            nav_down: KeyInput::Down,
        }
    }
}

impl Keymap {
    /// One-line help text for the status bar.
    pub fn help(&self) -> String {
        format!(
            "{} send | {} switch pane | {}/{} rooms | {} quit",
            key_label(self.submit),
            key_label(self.toggle_focus),
            key_label(self.nav_up),
            key_label(self.nav_down),
            key_label(self.quit),
        )
    }
}

fn key_label(key: KeyInput) -> String {
    match key {
        KeyInput::Char(c) => c.to_string(),
        KeyInput::Ctrl(c) => format!("ctrl+{c}"),
        KeyInput::Enter => "enter".into(),
        KeyInput::Backspace => "backspace".into(),
        KeyInput::Delete => "del".into(),
        KeyInput::Tab => "tab".into(),
        KeyInput::Esc => "esc".into(),
        KeyInput::Left => "←".into(),
        KeyInput::Right => "→".into(),
        KeyInput::Up => "↑".into(),
        KeyInput::Down => "↓".into(),
        KeyInput::Home => "home".into(),
        KeyInput::End => "end".into(),
        KeyInput::PageUp => "pgup".into(),
        KeyInput::PageDown => "pgdn".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_help_lists_reserved_keys() {
        assert_eq!(Keymap::default().help(), "enter send | tab switch pane | ↑/↓ rooms | ctrl+c quit");
    }
}
