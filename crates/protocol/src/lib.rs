//! CrossCircle Protocol - shared types for engine/client communication.
//!
//! Everything that crosses the wire is defined here so the engine and any
//! client agree on one schema. Session bookkeeping that must not leave the
//! server (connection identities, participant slots) has no representation
//! in this crate.

mod messages;
mod session_view;

pub use messages::{ClientMessage, MovePayload, ServerMessage};
pub use session_view::SessionView;
