//! Chat service trait.
//!
//! The [`ChatService`] trait is the only surface of the remote client the
//! application touches: one blocking long-poll and one outbound send. The
//! production implementation is [`crate::transport::MatrixClient`] (feature
//! `transport`); tests substitute scripted services.

use std::future::Future;

use crate::{ClientError, SyncBatch};

/// Remote chat service, already authenticated.
///
/// Implementations must be shareable across tasks: the ingestion bridge runs
/// `sync` on its own task while sends are dispatched from the UI loop.
pub trait ChatService: Send + Sync + 'static {
    /// Long-poll for new events.
    ///
    /// `since` is the `next_batch` token of the previous batch, or `None` for
    /// the initial sync. Resolves when the server has events or its poll
    /// timeout elapses.
    fn sync(
        &self,
        since: Option<&str>,
    ) -> impl Future<Output = Result<SyncBatch, ClientError>> + Send;

    /// Post a plain text message to a room.
    fn send_text(
        &self,
        room_id: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}
