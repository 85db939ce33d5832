//! Session error types

use crosscircle_domain::MoveError;

/// Error types for session operations.
///
/// Every variant is recoverable at the action boundary: the WebSocket
/// dispatcher turns it into a single `error` outcome for the originating
/// connection and session state stays untouched.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session is registered under the supplied code.
    #[error("Room does not exist")]
    NotFound,

    /// A second participant already joined.
    #[error("Room is full")]
    RoomFull,

    /// The registry reached the configured session limit.
    #[error("Server is full, try again later")]
    CapacityExceeded,

    /// Move rejected by the board engine.
    #[error(transparent)]
    Move(#[from] MoveError),
}
