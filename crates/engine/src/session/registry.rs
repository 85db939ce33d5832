//! In-memory session registry.

use dashmap::mapref::one::RefMut;
use dashmap::DashMap;

use crosscircle_domain::SessionCode;

use super::{GameSession, SessionError};

/// Owns every live session, keyed by session code.
///
/// Built on a concurrent map so operations on one session are atomic while
/// its entry guard is held, and operations on different codes never contend.
/// The registry is the exclusive owner of session lifetime; callers hold a
/// guard for at most the duration of one coordinator operation and must
/// never await while holding one.
pub struct SessionRegistry {
    sessions: DashMap<SessionCode, GameSession>,
    /// Maximum number of live sessions, enforced at creation time only.
    limit: usize,
}

impl SessionRegistry {
    pub fn new(limit: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            limit,
        }
    }

    /// Register a new session under its code.
    pub fn create(&self, session: GameSession) -> Result<(), SessionError> {
        if self.sessions.len() >= self.limit {
            tracing::warn!(
                sessions = self.sessions.len(),
                limit = self.limit,
                "Session limit reached"
            );
            return Err(SessionError::CapacityExceeded);
        }
        self.sessions.insert(session.code().clone(), session);
        Ok(())
    }

    pub fn contains(&self, code: &SessionCode) -> bool {
        self.sessions.contains_key(code)
    }

    /// Entry guard for in-place mutation of one session.
    pub fn get_mut(
        &self,
        code: &SessionCode,
    ) -> Result<RefMut<'_, SessionCode, GameSession>, SessionError> {
        self.sessions.get_mut(code).ok_or(SessionError::NotFound)
    }

    /// Remove a session. Removing an absent code is not an error.
    pub fn remove(&self, code: &SessionCode) -> Option<GameSession> {
        self.sessions.remove(code).map(|(_, session)| session)
    }

    /// Snapshot of all live codes. Iterating over a snapshot keeps callers
    /// from holding entry locks while they mutate or remove.
    pub fn codes(&self) -> Vec<SessionCode> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::ConnectionId;
    use super::*;
    use crosscircle_domain::{FieldRules, GameFeatures};

    fn session(code: &str) -> GameSession {
        GameSession::new(
            SessionCode::new(code),
            FieldRules::default(),
            GameFeatures::default(),
            ConnectionId::new(),
        )
    }

    #[test]
    fn test_create_up_to_limit_then_reject() {
        let registry = SessionRegistry::new(2);

        registry.create(session("AAAAAA")).expect("first fits");
        registry.create(session("BBBBBB")).expect("second fits");

        let result = registry.create(session("CCCCCC"));
        assert!(matches!(result, Err(SessionError::CapacityExceeded)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_capacity_frees_up_after_removal() {
        let registry = SessionRegistry::new(1);
        registry.create(session("AAAAAA")).expect("fits");

        registry.remove(&SessionCode::new("AAAAAA"));
        registry.create(session("BBBBBB")).expect("fits after removal");
    }

    #[test]
    fn test_get_mut_unknown_code_fails() {
        let registry = SessionRegistry::new(4);
        let result = registry.get_mut(&SessionCode::new("NOSUCH"));
        assert!(matches!(result, Err(SessionError::NotFound)));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = SessionRegistry::new(4);
        registry.create(session("AAAAAA")).expect("fits");

        assert!(registry.remove(&SessionCode::new("AAAAAA")).is_some());
        assert!(registry.remove(&SessionCode::new("AAAAAA")).is_none());
    }
}
