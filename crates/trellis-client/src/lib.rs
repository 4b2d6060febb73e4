//! Client
//!
//! Boundary between Trellis and the remote chat service. Defines the protocol
//! events the application consumes, the [`ChatService`] seam the ingestion
//! bridge drives, and the decoding of Matrix `/sync` responses into those
//! events.
//!
//! # Components
//!
//! - [`ChatService`]: Long-poll sync and outbound text send
//! - [`ProtocolEvent`]: Events decoded from a sync response
//! - [`SyncBatch`]: One sync response worth of events plus the next token
//! - [`SyncResponse`]: Wire shape of a Matrix `/sync` response
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::MatrixClient`]: Matrix client-server API over HTTPS
//! - [`transport::Credentials`]: Password login parameters

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod event;
mod service;
mod sync;

#[cfg(feature = "transport")]
pub mod transport;

pub use error::ClientError;
pub use event::{MessageEvent, ProtocolEvent, RoomId, RoomRenameEvent, SyncBatch};
pub use service::ChatService;
pub use sync::SyncResponse;
