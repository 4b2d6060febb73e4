//! Application state machine.
//!
//! This module defines the [`App`] state machine, which reconciles inbound
//! room events with local navigation and composition, completely decoupled
//! from I/O and protocol mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Owns the [`RoomStore`] and the three widget models.
//! - Routes keys: reserved keys first, everything else to the focused widget.
//! - Derives the selected room from the room list cursor.
//! - Tracks unread rooms, terminal dimensions and the status line.

use std::collections::HashSet;

use trellis_client::RoomId;

use crate::{
    AppAction, AppEvent, KeyInput, Keymap, MessageLine, PaneLayout, RoomStore,
    widgets::{Component, Composer, RoomList, Transcript},
};

/// Which widget receives printable keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Room list has focus; navigation keys move the selection.
    #[default]
    Navigate,
    /// Composer has focus; the submit key sends.
    Compose,
}

impl Focus {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Navigate => Self::Compose,
            Self::Compose => Self::Navigate,
        }
    }
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Reserved key bindings.
    keymap: Keymap,
    /// Rooms and transcripts.
    store: RoomStore,
    /// Room list widget. Its cursor is the room selection.
    room_list: RoomList,
    /// Transcript of the selected room.
    transcript: Transcript,
    /// Message composer.
    composer: Composer,
    /// Active input mode.
    focus: Focus,
    /// Rooms with messages not yet seen.
    unread: HashSet<RoomId>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Pane geometry for the current terminal size.
    layout: PaneLayout,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
    /// Most recent error reported to the state machine.
    last_error: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Keymap::default())
    }
}

impl App {
    /// Create a new App with the given key bindings.
    pub fn new(keymap: Keymap) -> Self {
        let terminal_size = (80, 24);
        let layout = PaneLayout::compute(terminal_size.0, terminal_size.1);
        let mut transcript = Transcript::new();
        let inner = layout.transcript.inner();
        transcript.resize(inner.width, inner.height);

        Self {
            keymap,
            store: RoomStore::new(),
            room_list: RoomList::new(),
            transcript,
            composer: Composer::new(),
            focus: Focus::Navigate,
            unread: HashSet::new(),
            terminal_size,
            layout,
            status_message: None,
            last_error: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Message { room_id, sender, timestamp, body } => {
                let line = MessageLine::new(sender, timestamp, body);
                let before = self.selected_room_id();

                if self.store.append_message(&room_id, line.clone()) {
                    self.room_list.set_entries(self.store.display_order());
                }

                if self.selected_room_id() != before {
                    self.refresh_transcript();
                } else if before.as_deref() == Some(room_id.as_str()) {
                    self.transcript.push(line);
                    self.transcript.goto_bottom();
                } else {
                    self.unread.insert(room_id);
                }
                vec![AppAction::Render]
            },
            AppEvent::Room { room_id, name } => {
                let before = self.selected_room_id();
                self.store.upsert_room(&room_id, &name);
                self.room_list.set_entries(self.store.display_order());
                if self.selected_room_id() != before {
                    self.refresh_transcript();
                }
                vec![AppAction::Render]
            },
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                self.layout = PaneLayout::compute(cols, rows);
                let inner = self.layout.transcript.inner();
                self.transcript.resize(inner.width, inner.height);
                vec![AppAction::Render]
            },
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Error { message } => {
                self.set_status(format!("Error: {message}"));
                self.last_error = Some(message);
                vec![AppAction::Render]
            },
        }
    }

    /// Any key dismisses the status message; the help line returns.
    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let dismissed = self.status_message.take().is_some();
        let mut actions = self.route_key(key);
        if dismissed && actions.is_empty() {
            actions.push(AppAction::Render);
        }
        actions
    }

    fn route_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if key == self.keymap.quit {
            return vec![AppAction::Quit];
        }
        if key == self.keymap.toggle_focus {
            self.set_focus(self.focus.toggled());
            return vec![AppAction::Render];
        }
        if self.transcript.handle_key(key) {
            return vec![AppAction::Render];
        }

        match self.focus {
            Focus::Navigate => self.handle_navigate_key(key),
            Focus::Compose => self.handle_compose_key(key),
        }
    }

    fn handle_navigate_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let before = self.selected_room_id();
        let consumed = if key == self.keymap.nav_up {
            self.room_list.select_prev();
            true
        } else if key == self.keymap.nav_down {
            self.room_list.select_next();
            true
        } else {
            self.room_list.handle_key(key)
        };

        if !consumed {
            return vec![];
        }
        if self.selected_room_id() != before {
            self.refresh_transcript();
        }
        vec![AppAction::Render]
    }

    fn handle_compose_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if key == self.keymap.submit {
            return self.submit();
        }
        if self.composer.handle_key(key) { vec![AppAction::Render] } else { vec![] }
    }

    fn submit(&mut self) -> Vec<AppAction> {
        if self.composer.is_empty() {
            return vec![];
        }
        let Some(room_id) = self.selected_room_id() else {
            self.set_status("No room selected");
            return vec![AppAction::Render];
        };
        let body = self.composer.take();
        vec![AppAction::SendText { room_id, body }, AppAction::Render]
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        match focus {
            Focus::Navigate => self.composer.blur(),
            Focus::Compose => self.composer.focus(),
        }
    }

    /// Show the selected room's transcript, scrolled to the newest line.
    fn refresh_transcript(&mut self) {
        let selected = self.room_list.selected().map(|entry| entry.id.clone());
        match selected {
            Some(room_id) => {
                self.transcript.set_lines(self.store.lines_for(&room_id));
                self.unread.remove(&room_id);
            },
            None => self.transcript.set_lines(&[]),
        }
        self.transcript.goto_bottom();
    }

    fn selected_room_id(&self) -> Option<RoomId> {
        self.selected_room().map(str::to_owned)
    }

    /// Show a status message until the next key press.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Currently selected room. `None` if no rooms are known.
    pub fn selected_room(&self) -> Option<&str> {
        self.room_list.selected().map(|entry| entry.id.as_str())
    }

    /// Rooms and transcripts.
    pub fn store(&self) -> &RoomStore {
        &self.store
    }

    /// Room list widget.
    pub fn room_list(&self) -> &RoomList {
        &self.room_list
    }

    /// Transcript widget.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Composer widget.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Active input mode.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Key bindings.
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Whether a room has messages not yet seen.
    pub fn is_unread(&self, room_id: &str) -> bool {
        self.unread.contains(room_id)
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Pane geometry for the current terminal size.
    pub fn layout(&self) -> &PaneLayout {
        &self.layout
    }

    /// Transient status message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Most recent error.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
