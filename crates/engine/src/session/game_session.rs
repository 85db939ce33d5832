//! GameSession aggregate and lifecycle.

use chrono::{DateTime, Utc};

use crosscircle_domain::{
    board, FieldRules, GameFeatures, MoveError, Player, Point, SessionCode,
};
use crosscircle_protocol::SessionView;

use super::{ConnectionId, SessionError};

/// One game between two participants, identified by a short code.
///
/// Field rules and features are fixed at creation. The registry is the
/// exclusive owner of instances; the coordinator mutates them in place under
/// a registry entry guard, never holding one past a single operation.
#[derive(Debug)]
pub struct GameSession {
    code: SessionCode,
    field_rules: FieldRules,
    game_features: GameFeatures,
    /// False until the second participant joins.
    started: bool,
    current_turn: Player,
    /// Insertion order is move order; append-only except for the
    /// infinite-play eviction.
    points: Vec<Point>,
    winner: Option<Player>,
    /// Participant slots. The host is cross, the guest circle.
    host: Option<ConnectionId>,
    guest: Option<ConnectionId>,
    created_at: DateTime<Utc>,
}

impl GameSession {
    /// Create a fresh session with the caller as host. Cross moves first.
    pub fn new(
        code: SessionCode,
        field_rules: FieldRules,
        game_features: GameFeatures,
        host: ConnectionId,
    ) -> Self {
        Self {
            code,
            field_rules,
            game_features,
            started: false,
            current_turn: Player::Cross,
            points: Vec::new(),
            winner: None,
            host: Some(host),
            guest: None,
            created_at: Utc::now(),
        }
    }

    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Admit the second participant. Exactly one join is allowed; any
    /// further attempt fails with `RoomFull`.
    pub fn join(&mut self, guest: ConnectionId) -> Result<(), SessionError> {
        if self.started {
            return Err(SessionError::RoomFull);
        }
        self.guest = Some(guest);
        self.started = true;
        Ok(())
    }

    /// Validate and commit one move for the player whose turn it is.
    ///
    /// A rejected move leaves the session untouched; the board engine only
    /// hands back a new sequence when the move is legal.
    pub fn make_move(&mut self, x: i32, y: i32) -> Result<(), MoveError> {
        let point = Point::new(x, y, self.current_turn);
        let outcome = board::apply_move(
            point,
            &self.points,
            self.game_features,
            self.field_rules.points_in_row_to_win,
        )?;

        self.points = outcome.points;
        self.winner = outcome.winner;
        self.current_turn = outcome.next_turn;
        Ok(())
    }

    /// Reset points, winner, and turn. Rules and features stay as created,
    /// and `started` is not reset - the room keeps both participants.
    pub fn restart(&mut self) {
        self.points.clear();
        self.winner = None;
        self.current_turn = Player::Cross;
    }

    /// Release any participant slot held by `conn`. Returns whether the
    /// connection held one.
    pub fn release(&mut self, conn: ConnectionId) -> bool {
        let mut held = false;
        if self.host == Some(conn) {
            self.host = None;
            held = true;
        }
        if self.guest == Some(conn) {
            self.guest = None;
            held = true;
        }
        held
    }

    /// True when both participant slots are empty; the session should be
    /// torn down.
    pub fn is_vacant(&self) -> bool {
        self.host.is_none() && self.guest.is_none()
    }

    /// Snapshot for the wire, without connection bookkeeping.
    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.code.clone(),
            session_started: self.started,
            field_rules: self.field_rules,
            game_features: self.game_features,
            current_move: self.current_turn,
            points: self.points.clone(),
            winner: self.winner,
        }
    }
}
