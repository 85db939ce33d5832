//! Connection management for WebSocket clients.
//!
//! Tracks each live connection's outbound channel and which sessions it is
//! subscribed to. Membership is kept separately from the session aggregate
//! so coordinator mutation and delivery can be reasoned about independently.

use std::collections::{HashMap, HashSet};

use dashmap::DashMap;
use tokio::sync::{mpsc, RwLock};

use crosscircle_domain::SessionCode;
use crosscircle_protocol::ServerMessage;

use crate::session::ConnectionId;

/// Manages all active WebSocket connections and session membership.
pub struct ConnectionManager {
    /// Map of connection id -> outbound channel.
    senders: RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<ServerMessage>>>,
    /// Map of session code -> subscribed connections.
    members: DashMap<SessionCode, HashSet<ConnectionId>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            senders: RwLock::new(HashMap::new()),
            members: DashMap::new(),
        }
    }

    /// Register a new connection's outbound channel.
    pub async fn register(
        &self,
        conn: ConnectionId,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) {
        let mut senders = self.senders.write().await;
        senders.insert(conn, sender);
        tracing::debug!(connection = %conn, "Connection registered");
    }

    /// Drop a connection and every session membership it holds.
    pub async fn unregister(&self, conn: ConnectionId) {
        let mut senders = self.senders.write().await;
        if senders.remove(&conn).is_some() {
            tracing::debug!(connection = %conn, "Connection unregistered");
        }
        drop(senders);

        for mut entry in self.members.iter_mut() {
            entry.value_mut().remove(&conn);
        }
        self.members.retain(|_, set| !set.is_empty());
    }

    /// Add `conn` to the session's subscriber set. Idempotent.
    pub fn subscribe(&self, conn: ConnectionId, code: &SessionCode) {
        self.members.entry(code.clone()).or_default().insert(conn);
    }

    /// Remove `conn` from the session's subscriber set. Idempotent.
    pub fn unsubscribe(&self, conn: ConnectionId, code: &SessionCode) {
        if let Some(mut set) = self.members.get_mut(code) {
            set.remove(&conn);
        }
    }

    /// Drop the whole subscriber set for a session.
    pub fn clear_session(&self, code: &SessionCode) {
        self.members.remove(code);
    }

    /// Number of subscribers for a session.
    pub fn subscriber_count(&self, code: &SessionCode) -> usize {
        self.members.get(code).map(|set| set.len()).unwrap_or(0)
    }

    /// Send one message to a single connection.
    pub async fn send_to(&self, conn: ConnectionId, message: ServerMessage) {
        let senders = self.senders.read().await;
        if let Some(tx) = senders.get(&conn) {
            if tx.send(message).is_err() {
                tracing::warn!(connection = %conn, "Failed to send message, channel closed");
            }
        }
    }

    /// Deliver `message` to every live subscriber of `code` except
    /// `exclude`.
    ///
    /// Iterates over a snapshot of the subscriber set, never the set itself.
    /// A subscriber whose channel has failed is pruned from membership and
    /// never aborts delivery to the rest.
    pub async fn publish(
        &self,
        code: &SessionCode,
        message: &ServerMessage,
        exclude: Option<ConnectionId>,
    ) {
        let subscribers: Vec<ConnectionId> = match self.members.get(code) {
            Some(set) => set.iter().copied().collect(),
            None => return,
        };

        let mut dead = Vec::new();
        {
            let senders = self.senders.read().await;
            for conn in subscribers {
                if Some(conn) == exclude {
                    continue;
                }
                match senders.get(&conn) {
                    Some(tx) if tx.send(message.clone()).is_ok() => {}
                    _ => dead.push(conn),
                }
            }
        }

        for conn in dead {
            tracing::warn!(connection = %conn, session = %code, "Pruning dead subscriber");
            self.unsubscribe(conn, code);
        }
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
