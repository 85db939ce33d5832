//! WebSocket handling for participant connections.
//!
//! Each connection runs one inbound loop plus one outbound forwarding task;
//! everything a participant sees arrives through its outbound channel, so
//! direct responses and fan-out deliveries share a single ordered stream.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crosscircle_protocol::{ClientMessage, ServerMessage};

use crate::session::{ConnectionId, GameCoordinator, SessionError};

use super::connections::ConnectionManager;

/// Combined state for WebSocket handlers.
pub struct WsState {
    pub coordinator: GameCoordinator,
    pub connections: Arc<ConnectionManager>,
}

/// WebSocket upgrade handler - entry point for new connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let connection_id = ConnectionId::new();

    // Channel for sending messages to this client; the coordinator and the
    // fan-out both deliver through it.
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.connections.register(connection_id, tx.clone()).await;

    tracing::info!(connection = %connection_id, "WebSocket connection established");

    // Forward messages from the channel to the WebSocket.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let response = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(msg) => match handle_message(msg, &state, connection_id).await {
                        Ok(response) => response,
                        Err(e) => {
                            tracing::warn!(
                                connection = %connection_id,
                                error = %e,
                                "Action rejected"
                            );
                            ServerMessage::error(e.to_string())
                        }
                    },
                    Err(e) => {
                        tracing::warn!(
                            connection = %connection_id,
                            error = %e,
                            "Failed to parse message"
                        );
                        ServerMessage::error(format!("Invalid message format: {e}"))
                    }
                };
                if tx.send(response).is_err() {
                    break;
                }
            }
            Ok(Message::Ping(_)) => {
                // Keep-alive only; never treated as a session-mutating action.
            }
            Ok(Message::Close(_)) => {
                tracing::info!(connection = %connection_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(connection = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    // Release participant slots first so empty sessions tear down, then drop
    // the outbound channel and membership.
    state.coordinator.disconnect(connection_id).await;
    state.connections.unregister(connection_id).await;
    send_task.abort();

    tracing::info!(connection = %connection_id, "WebSocket connection terminated");
}

/// Dispatch a parsed client message to the coordinator and fan the outcome
/// out to the session's other subscribers. The returned message goes back to
/// the caller directly, so each participant sees exactly one final state per
/// action.
async fn handle_message(
    msg: ClientMessage,
    state: &WsState,
    connection_id: ConnectionId,
) -> Result<ServerMessage, SessionError> {
    match msg {
        ClientMessage::CreateRoom {
            field_rules,
            game_features,
        } => {
            let session = state
                .coordinator
                .create_room(connection_id, field_rules, game_features)
                .await?;
            // No other subscriber exists yet; the outcome goes to the caller only.
            Ok(ServerMessage::RoomCreated { session })
        }

        ClientMessage::JoinRoom { session_id } => {
            let session = state
                .coordinator
                .join_room(connection_id, &session_id)
                .await?;
            let outcome = ServerMessage::RoomJoined { session };
            state
                .connections
                .publish(&session_id, &outcome, Some(connection_id))
                .await;
            Ok(outcome)
        }

        ClientMessage::MakeMove {
            session_id,
            position,
        } => {
            let session = state
                .coordinator
                .make_move(connection_id, &session_id, position.x, position.y)
                .await?;
            let outcome = ServerMessage::MoveMade { session };
            state
                .connections
                .publish(&session_id, &outcome, Some(connection_id))
                .await;
            Ok(outcome)
        }

        ClientMessage::Restart { session_id } => {
            let session = state
                .coordinator
                .restart(connection_id, &session_id)
                .await?;
            let outcome = ServerMessage::Restarted { session };
            state
                .connections
                .publish(&session_id, &outcome, Some(connection_id))
                .await;
            Ok(outcome)
        }

        ClientMessage::EndSession { session_id } => {
            // Publish before removal so the subscriber set still exists.
            let outcome = ServerMessage::SessionEnded {
                session_id: session_id.clone(),
            };
            state
                .connections
                .publish(&session_id, &outcome, Some(connection_id))
                .await;
            state
                .coordinator
                .end_session(connection_id, &session_id)
                .await;
            Ok(outcome)
        }
    }
}
