//! Client error types.

use thiserror::Error;

/// Errors returned by a [`crate::ChatService`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Homeserver address could not be used as a base URL.
    #[error("invalid homeserver URL: {0}")]
    InvalidHomeserver(String),

    /// Request never produced a response (DNS, connect, timeout).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, usually a Matrix error JSON object.
        body: String,
    },

    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}
