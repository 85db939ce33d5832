use serde::{Deserialize, Serialize};

use crate::Player;

/// A single occupied cell. Coordinates are 1-based.
///
/// Immutable once created; no two points in a session share coordinates.
/// The wire format keeps the uppercase `X`/`Y` field names clients expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
    pub player: Player,
}

impl Point {
    pub fn new(x: i32, y: i32, player: Player) -> Self {
        Self { x, y, player }
    }
}
