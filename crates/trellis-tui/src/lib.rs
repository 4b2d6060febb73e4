//! Terminal UI for Trellis
//!
//! A thin shell over [`trellis_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`trellis_app::Runtime`].
//!
//! This crate handles configuration, log setup, login, and terminal rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::sync::Arc;

use trellis_client::transport::MatrixClient;

pub mod config;
pub mod logging;
pub mod terminal;
pub mod theme;
pub mod ui;

pub use config::Args;
pub use terminal::{TerminalDriver, TerminalError, convert_key};
pub use theme::Theme;
pub use trellis_app::{App, AppAction, AppEvent, Driver, KeyInput, Keymap, Runtime};

/// Sign in, then run the client until the user quits.
///
/// Login happens before the terminal switches to raw mode, so a rejected
/// login is reported on the normal screen.
///
/// # Errors
///
/// Returns an error if login fails or the terminal cannot be driven.
pub async fn run(args: &Args) -> Result<(), TerminalError> {
    let client = MatrixClient::login(&args.credentials())
        .await?
        .with_sync_timeout(args.sync_timeout());
    tracing::info!(user_id = client.user_id(), "Starting session");

    let driver = TerminalDriver::new(Theme::default())?;
    let runtime = Runtime::new(driver, Arc::new(client), Keymap::default(), args.sync_config());

    runtime.run().await
}
