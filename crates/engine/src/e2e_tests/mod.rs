//! End-to-end tests driving a real engine over WebSocket clients.
//!
//! Each test spawns the engine on an ephemeral port and talks to it with
//! `tokio-tungstenite`, exactly as a browser client would: JSON actions in,
//! JSON outcomes out.

mod gameplay_flow_tests;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::api::{self, websocket::WsState, ConnectionManager};
use crate::session::{GameCoordinator, SessionRegistry};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Spawn an engine on an ephemeral port and return its address.
async fn spawn_engine(sessions_limit: usize) -> SocketAddr {
    let connections = Arc::new(ConnectionManager::new());
    let coordinator = GameCoordinator::new(
        SessionRegistry::new(sessions_limit),
        connections.clone(),
    );
    let state = Arc::new(WsState {
        coordinator,
        connections,
    });

    let router = api::http::routes().route("/ws", get(api::websocket::ws_handler).with_state(state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server runs");
    });

    addr
}

/// Connect a WebSocket client to a spawned engine.
async fn connect(addr: SocketAddr) -> WsClient {
    let (stream, _) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("client connects");
    stream
}

/// Send one action as JSON text.
async fn send_json(client: &mut WsClient, value: serde_json::Value) {
    client
        .send(Message::Text(value.to_string().into()))
        .await
        .expect("send succeeds");
}

/// Receive the next text frame as JSON, skipping protocol-level frames.
async fn recv_json(client: &mut WsClient) -> serde_json::Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("server responds in time")
            .expect("stream still open")
            .expect("frame is readable");
        match frame {
            Message::Text(text) => return serde_json::from_str(&text).expect("valid JSON"),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}

/// Create a room with default 3x3 rules and return (host, session id).
async fn create_default_room(addr: SocketAddr) -> (WsClient, String) {
    let mut host = connect(addr).await;
    send_json(
        &mut host,
        serde_json::json!({
            "action": "create-room",
            "data": {
                "fieldRules": { "columns": 3, "rows": 3, "pointsInRowToWin": 3 },
                "gameFeatures": { "infinitePlay": false }
            }
        }),
    )
    .await;

    let created = recv_json(&mut host).await;
    assert_eq!(created["action"], "room-created");
    let session_id = created["session"]["sessionId"]
        .as_str()
        .expect("session id present")
        .to_string();
    (host, session_id)
}

/// Join an existing room and return the guest once both sides saw the join.
async fn join_room(addr: SocketAddr, host: &mut WsClient, session_id: &str) -> WsClient {
    let mut guest = connect(addr).await;
    send_json(
        &mut guest,
        serde_json::json!({
            "action": "join-room",
            "data": { "sessionId": session_id }
        }),
    )
    .await;

    let joined = recv_json(&mut guest).await;
    assert_eq!(joined["action"], "room-joined");
    assert_eq!(joined["session"]["sessionStarted"], true);

    // The host learns about the join through the broadcast path.
    let broadcast = recv_json(host).await;
    assert_eq!(broadcast["action"], "room-joined");

    guest
}

/// Send a move and collect the outcome seen by the mover and the other side.
async fn make_move(
    mover: &mut WsClient,
    other: &mut WsClient,
    session_id: &str,
    x: i32,
    y: i32,
) -> (serde_json::Value, serde_json::Value) {
    send_json(
        mover,
        serde_json::json!({
            "action": "make-move",
            "data": { "sessionId": session_id, "move": { "x": x, "y": y } }
        }),
    )
    .await;

    let direct = recv_json(mover).await;
    let published = recv_json(other).await;
    (direct, published)
}
