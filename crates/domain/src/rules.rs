use serde::{Deserialize, Serialize};

/// Board dimensions and the line length required to win.
///
/// Fixed at session creation; never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRules {
    pub columns: u32,
    pub rows: u32,
    pub points_in_row_to_win: u32,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 3,
            points_in_row_to_win: 3,
        }
    }
}

/// Optional gameplay toggles, fixed at session creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFeatures {
    /// Cap each player's footprint at `points_in_row_to_win` cells by
    /// evicting that player's oldest point, enabling perpetual play.
    #[serde(default)]
    pub infinite_play: bool,
}
