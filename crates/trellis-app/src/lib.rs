//! Application layer for Trellis
//!
//! Pure state machines and generic runtime for a terminal chat client. Room
//! state, navigation and composition live here with no terminal dependency,
//! so the same code runs in production and under test drivers.
//!
//! # Components
//!
//! - [`RoomStore`]: rooms, display order and transcripts
//! - [`App`]: UI state machine (key routing, room selection, composition)
//! - [`Bridge`]: Sync loop feeding protocol events into the App inbox
//! - [`Driver`]: Trait for platform-specific input and rendering
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod input;
mod keymap;
mod layout;
mod runtime;
mod store;
pub mod widgets;

pub use action::AppAction;
pub use app::{App, Focus};
pub use bridge::{Bridge, SyncConfig, translate};
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use keymap::Keymap;
pub use layout::{COMPOSER_HEIGHT, Pane, PaneLayout, ROOM_LIST_MIN_WIDTH, STATUS_HEIGHT};
pub use runtime::Runtime;
pub use store::{MessageLine, RoomEntry, RoomStore};
