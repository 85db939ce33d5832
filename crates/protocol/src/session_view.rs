use serde::{Deserialize, Serialize};

use crosscircle_domain::{FieldRules, GameFeatures, Player, Point, SessionCode};

/// Snapshot of a session as presented to participants.
///
/// This is the payload of every successful outcome that carries state.
/// `winner` is omitted from the JSON while unset, matching what clients
/// already expect from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: SessionCode,
    pub session_started: bool,
    pub field_rules: FieldRules,
    pub game_features: GameFeatures,
    pub current_move: Player,
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Player>,
}
