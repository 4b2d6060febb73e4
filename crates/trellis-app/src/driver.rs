//! Driver trait for abstracting terminal I/O.
//!
//! The [`Driver`] trait decouples the application runtime from a specific
//! terminal library. The production frontend implements it with crossterm and
//! ratatui; tests implement it with scripted input and recorded frames. The
//! generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{App, AppEvent};

/// Abstracts local input and rendering for the application runtime.
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next local input event.
    ///
    /// Returns `None` once input is closed, which ends the run loop.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Current terminal size (columns, rows).
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    fn size(&self) -> Result<(u16, u16), Self::Error>;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Restore the terminal and release resources.
    fn stop(&mut self);
}
