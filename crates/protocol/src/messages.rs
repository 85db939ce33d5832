//! WebSocket message types for engine-client communication.
//!
//! Inbound messages arrive as `{"action": "...", "data": {...}}`; outbound
//! messages are flat objects tagged with the same `action` discriminator.
//! Both use kebab-case action names and camelCase payload fields.

use serde::{Deserialize, Serialize};

use crosscircle_domain::{FieldRules, GameFeatures, SessionCode};

use crate::SessionView;

/// Grid coordinates for a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePayload {
    pub x: i32,
    pub y: i32,
}

/// Messages from a participant to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    tag = "action",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    /// Open a new session; the caller becomes its host.
    CreateRoom {
        field_rules: FieldRules,
        #[serde(default)]
        game_features: GameFeatures,
    },
    /// Join an existing session as the second participant.
    JoinRoom { session_id: SessionCode },
    /// Place a point; the engine assigns the mover from the current turn.
    MakeMove {
        session_id: SessionCode,
        #[serde(rename = "move")]
        position: MovePayload,
    },
    /// Reset points, winner, and turn; rules stay as created.
    Restart { session_id: SessionCode },
    /// Tear the session down for both participants.
    EndSession { session_id: SessionCode },
}

/// Messages from the engine to participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    RoomCreated { session: SessionView },
    RoomJoined { session: SessionView },
    MoveMade { session: SessionView },
    Restarted { session: SessionView },
    SessionEnded { session_id: SessionCode },
    /// Delivered only to the originating connection; session state unchanged.
    Error { timestamp: i64, message: String },
}

impl ServerMessage {
    /// Build an `error` outcome. The timestamp keeps otherwise-identical
    /// payloads distinguishable on the client side.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            timestamp: chrono::Utc::now().timestamp_millis(),
            message: message.into(),
        }
    }
}
