use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two sides of a session. Cross always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Cross,
    Circle,
}

impl Player {
    /// The player whose move follows this one's.
    pub fn other(self) -> Self {
        match self {
            Player::Cross => Player::Circle,
            Player::Circle => Player::Cross,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Cross => write!(f, "cross"),
            Player::Circle => write!(f, "circle"),
        }
    }
}
