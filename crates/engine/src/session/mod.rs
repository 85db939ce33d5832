//! Session management for active game rooms.
//!
//! This module provides session tracking for WebSocket connections: the
//! registry owning every live session, the per-session aggregate and its
//! lifecycle, and the coordinator that validates inbound actions before
//! mutating anything.

mod codes;
mod coordinator;
mod errors;
mod game_session;
mod registry;

// Re-export all public types
pub use coordinator::GameCoordinator;
pub use errors::SessionError;
pub use game_session::GameSession;
pub use registry::SessionRegistry;

/// Unique identifier for a connected client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
