//! Action validation and session mutation.

use std::sync::Arc;

use crosscircle_domain::{FieldRules, GameFeatures, SessionCode};
use crosscircle_protocol::SessionView;

use crate::api::connections::ConnectionManager;

use super::{codes, ConnectionId, GameSession, SessionError, SessionRegistry};

/// How many codes to draw before giving up on finding an unused one.
/// With 26^6 codes and a bounded registry this effectively never trips.
const CODE_ATTEMPTS: usize = 16;

/// Validates inbound actions against session state and applies them.
///
/// Every mutation of a single session happens under that session's registry
/// entry guard; fan-out subscription changes and delivery run only after the
/// guard is released, so a half-applied action is never observable.
pub struct GameCoordinator {
    registry: SessionRegistry,
    connections: Arc<ConnectionManager>,
}

impl GameCoordinator {
    pub fn new(registry: SessionRegistry, connections: Arc<ConnectionManager>) -> Self {
        Self {
            registry,
            connections,
        }
    }

    /// The registry backing this coordinator.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// `create-room`: open a fresh session with the caller as host.
    pub async fn create_room(
        &self,
        conn: ConnectionId,
        field_rules: FieldRules,
        game_features: GameFeatures,
    ) -> Result<SessionView, SessionError> {
        let code = self.unused_code()?;
        let session = GameSession::new(code.clone(), field_rules, game_features, conn);
        let view = session.view();
        self.registry.create(session)?;
        self.connections.subscribe(conn, &code);

        tracing::info!(session = %code, connection = %conn, "Room created");
        Ok(view)
    }

    /// `join-room`: admit the caller as guest and mark the session started.
    pub async fn join_room(
        &self,
        conn: ConnectionId,
        code: &SessionCode,
    ) -> Result<SessionView, SessionError> {
        let view = {
            let mut session = self.registry.get_mut(code)?;
            session.join(conn)?;
            session.view()
        };
        self.connections.subscribe(conn, code);

        tracing::info!(session = %code, connection = %conn, "Guest joined room");
        Ok(view)
    }

    /// `make-move`: delegate to the board engine; a rejected move leaves the
    /// session exactly as it was.
    pub async fn make_move(
        &self,
        conn: ConnectionId,
        code: &SessionCode,
        x: i32,
        y: i32,
    ) -> Result<SessionView, SessionError> {
        let mut session = self.registry.get_mut(code)?;
        session.make_move(x, y)?;

        tracing::debug!(
            session = %code,
            connection = %conn,
            x,
            y,
            winner = ?session.winner(),
            "Move applied"
        );
        Ok(session.view())
    }

    /// `restart`: reset points, winner, and turn. No turn-order or occupancy
    /// checks apply to the restart itself.
    pub async fn restart(
        &self,
        conn: ConnectionId,
        code: &SessionCode,
    ) -> Result<SessionView, SessionError> {
        let mut session = self.registry.get_mut(code)?;
        session.restart();

        tracing::info!(session = %code, connection = %conn, "Session restarted");
        Ok(session.view())
    }

    /// `end-session`: remove the session and its subscriber set. Ending an
    /// absent session is tolerated.
    pub async fn end_session(&self, conn: ConnectionId, code: &SessionCode) {
        if self.registry.remove(code).is_some() {
            tracing::info!(session = %code, connection = %conn, "Session ended");
        }
        self.connections.clear_session(code);
    }

    /// Release every participant slot held by a dropped connection and tear
    /// down sessions left with no participants. A connection may be tied to
    /// more than one session; each is released independently.
    pub async fn disconnect(&self, conn: ConnectionId) {
        let mut emptied = Vec::new();
        for code in self.registry.codes() {
            let Ok(mut session) = self.registry.get_mut(&code) else {
                // Removed concurrently; nothing left to release.
                continue;
            };
            if session.release(conn) && session.is_vacant() {
                emptied.push(code.clone());
            }
        }

        for code in emptied {
            self.registry.remove(&code);
            self.connections.clear_session(&code);
            tracing::info!(session = %code, "Session torn down after both participants left");
        }
    }

    /// Draw codes until one is unused, instead of overwriting a live session
    /// on collision.
    fn unused_code(&self) -> Result<SessionCode, SessionError> {
        for _ in 0..CODE_ATTEMPTS {
            let code = codes::generate();
            if !self.registry.contains(&code) {
                return Ok(code);
            }
        }
        // Only reachable when the code space is saturated, which the session
        // limit rules out long before.
        Err(SessionError::CapacityExceeded)
    }
}
