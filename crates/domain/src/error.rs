//! Board engine error types

use thiserror::Error;

/// Rejections produced by the board engine.
///
/// A rejected move leaves the caller's point sequence untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Two consecutive moves by the same player. Turn order is inferred
    /// from the point sequence itself, so this also guards against replay.
    #[error("Against rules making a move 2 times in a row")]
    OutOfTurn,

    /// The target cell already holds a point.
    #[error("Against rules making a move on a taken point")]
    CellOccupied,
}
