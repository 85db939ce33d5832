//! Pure move application and win detection.
//!
//! The board is never materialized as a grid; state is the ordered sequence
//! of placed points, and every check runs against that sequence.

use crate::{GameFeatures, MoveError, Player, Point};

/// Result of applying a single valid move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The updated point sequence, insertion order preserved.
    pub points: Vec<Point>,
    pub winner: Option<Player>,
    pub next_turn: Player,
}

/// Validate `point` against `existing` and produce the updated sequence.
///
/// Turn order is inferred from the sequence itself: a move is rejected when
/// the last placed point belongs to the same player. With infinite play
/// enabled, the mover's oldest point is evicted once their placed count
/// exceeds `points_in_row_to_win`, keeping each player's footprint bounded.
pub fn apply_move(
    point: Point,
    existing: &[Point],
    features: GameFeatures,
    points_in_row_to_win: u32,
) -> Result<MoveOutcome, MoveError> {
    if existing.last().map(|p| p.player) == Some(point.player) {
        return Err(MoveError::OutOfTurn);
    }

    if existing.iter().any(|p| p.x == point.x && p.y == point.y) {
        return Err(MoveError::CellOccupied);
    }

    let mut points = existing.to_vec();
    points.push(point);

    if features.infinite_play {
        let placed = points.iter().filter(|p| p.player == point.player).count();
        if placed > points_in_row_to_win as usize {
            if let Some(oldest) = points.iter().position(|p| p.player == point.player) {
                points.remove(oldest);
            }
        }
    }

    let winner = detect_winner(&points, points_in_row_to_win);
    let next_turn = point.player.other();

    Ok(MoveOutcome {
        points,
        winner,
        next_turn,
    })
}

/// Scan the `1..=points_in_row_to_win` sub-grid for a full horizontal,
/// vertical, or diagonal line. Cross is checked before circle; a full board
/// with no line stays `None`.
pub fn detect_winner(points: &[Point], points_in_row_to_win: u32) -> Option<Player> {
    let n = points_in_row_to_win as i32;
    let has = |x: i32, y: i32, player: Player| {
        points
            .iter()
            .any(|p| p.x == x && p.y == y && p.player == player)
    };

    for player in [Player::Cross, Player::Circle] {
        let horizontal = (1..=n).any(|y| (1..=n).all(|x| has(x, y, player)));
        let vertical = (1..=n).any(|x| (1..=n).all(|y| has(x, y, player)));
        let diagonal =
            (1..=n).all(|i| has(i, i, player)) || (1..=n).all(|i| has(i, n - i + 1, player));

        if horizontal || vertical || diagonal {
            return Some(player);
        }
    }

    None
}
