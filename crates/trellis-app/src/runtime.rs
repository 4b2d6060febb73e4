//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: Sync loop and outbound sends
//! - [`Driver`]: Platform-specific input and rendering
//!
//! Local input and bridge deliveries share one loop. Each event is handled to
//! completion, and its actions executed, before the next is taken.

use std::sync::Arc;

use tokio::sync::mpsc;
use trellis_client::ChatService;

use crate::{App, AppAction, AppEvent, Bridge, Driver, Keymap, SyncConfig};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `S`: Remote chat service
pub struct Runtime<D, S>
where
    D: Driver,
    S: ChatService,
{
    driver: D,
    app: App,
    bridge: Bridge<S>,
    inbox: mpsc::UnboundedReceiver<AppEvent>,
}

impl<D, S> Runtime<D, S>
where
    D: Driver,
    S: ChatService,
{
    /// Create a runtime and start syncing. Must be called within a tokio
    /// runtime.
    pub fn new(driver: D, service: Arc<S>, keymap: Keymap, config: SyncConfig) -> Self {
        let (tx, inbox) = mpsc::unbounded_channel();
        let bridge = Bridge::spawn(service, tx, config);
        Self { driver, app: App::new(keymap), bridge, inbox }
    }

    /// Application state.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run the main event loop until the user quits or input closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let (cols, rows) = self.driver.size()?;
        let actions = self.app.handle(AppEvent::Resize(cols, rows));
        let mut should_quit = self.process_actions(actions)?;

        while !should_quit {
            let event = tokio::select! {
                biased;
                input = self.driver.poll_event() => match input? {
                    Some(event) => event,
                    None => break,
                },
                Some(event) = self.inbox.recv() => event,
            };

            let actions = self.app.handle(event);
            should_quit = self.process_actions(actions)?;
        }

        tracing::info!("Shutting down");
        self.bridge.stop();
        self.driver.stop();
        Ok(())
    }

    /// Execute actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                AppAction::SendText { room_id, body } => self.bridge.send_text(room_id, body),
            }
        }
        Ok(false)
    }
}
