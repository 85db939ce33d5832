//! Full gameplay flows over real WebSocket connections.
//!
//! # Test Scenarios
//!
//! ## Create / join / play
//! - Host creates a room, guest joins, both see every move in order
//! - The scripted vertical line ends the game with cross as winner
//!
//! ## Failure isolation
//! - A rejected move produces an error for the mover only
//! - Unknown codes and full rooms are reported to the caller only
//!
//! ## Lifecycle
//! - Restart resets state for both participants
//! - end-session reaches the other participant before the room vanishes
//! - Disconnect of both participants tears the session down

use serde_json::json;

use super::*;

#[tokio::test]
async fn test_full_game_to_vertical_win() {
    let addr = spawn_engine(8).await;
    let (mut host, session_id) = create_default_room(addr).await;
    let mut guest = join_room(addr, &mut host, &session_id).await;

    // cross:(1,1) circle:(2,1) cross:(1,2) circle:(2,2) - no winner yet
    let script = [(1, 1), (2, 1), (1, 2), (2, 2)];
    for (i, &(x, y)) in script.iter().enumerate() {
        let (direct, published) = if i % 2 == 0 {
            make_move(&mut host, &mut guest, &session_id, x, y).await
        } else {
            make_move(&mut guest, &mut host, &session_id, x, y).await
        };
        assert_eq!(direct["action"], "move-made");
        assert_eq!(
            direct, published,
            "both participants see the same state after move {i}"
        );
        assert!(direct["session"].get("winner").is_none());
    }

    // cross:(1,3) completes the x=1 column
    let (direct, published) = make_move(&mut host, &mut guest, &session_id, 1, 3).await;
    assert_eq!(direct["session"]["winner"], "cross");
    assert_eq!(published["session"]["winner"], "cross");
    assert_eq!(direct["session"]["points"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_rejected_move_reaches_mover_only() {
    let addr = spawn_engine(8).await;
    let (mut host, session_id) = create_default_room(addr).await;
    let mut guest = join_room(addr, &mut host, &session_id).await;

    let (direct, _) = make_move(&mut host, &mut guest, &session_id, 1, 1).await;
    assert_eq!(direct["action"], "move-made");

    // Same cell again: rejected, and only the mover hears about it.
    send_json(
        &mut guest,
        json!({
            "action": "make-move",
            "data": { "sessionId": session_id, "move": { "x": 1, "y": 1 } }
        }),
    )
    .await;
    let error = recv_json(&mut guest).await;
    assert_eq!(error["action"], "error");
    assert_eq!(
        error["message"],
        "Against rules making a move on a taken point"
    );

    // The host's next message is the following valid move, not the error.
    let (_, published) = make_move(&mut guest, &mut host, &session_id, 2, 2).await;
    assert_eq!(published["action"], "move-made");
    assert_eq!(published["session"]["points"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_join_unknown_room_reports_error() {
    let addr = spawn_engine(8).await;
    let mut client = connect(addr).await;

    send_json(
        &mut client,
        json!({ "action": "join-room", "data": { "sessionId": "NOSUCH" } }),
    )
    .await;

    let error = recv_json(&mut client).await;
    assert_eq!(error["action"], "error");
    assert_eq!(error["message"], "Room does not exist");
}

#[tokio::test]
async fn test_third_participant_is_rejected() {
    let addr = spawn_engine(8).await;
    let (mut host, session_id) = create_default_room(addr).await;
    let _guest = join_room(addr, &mut host, &session_id).await;

    let mut third = connect(addr).await;
    send_json(
        &mut third,
        json!({ "action": "join-room", "data": { "sessionId": session_id } }),
    )
    .await;

    let error = recv_json(&mut third).await;
    assert_eq!(error["action"], "error");
    assert_eq!(error["message"], "Room is full");
}

#[tokio::test]
async fn test_capacity_limit_reported_to_creator() {
    let addr = spawn_engine(1).await;
    let (_host, _session_id) = create_default_room(addr).await;

    let mut second = connect(addr).await;
    send_json(
        &mut second,
        json!({
            "action": "create-room",
            "data": { "fieldRules": { "columns": 3, "rows": 3, "pointsInRowToWin": 3 } }
        }),
    )
    .await;

    let error = recv_json(&mut second).await;
    assert_eq!(error["action"], "error");
    assert_eq!(error["message"], "Server is full, try again later");
}

#[tokio::test]
async fn test_restart_is_broadcast_to_both() {
    let addr = spawn_engine(8).await;
    let (mut host, session_id) = create_default_room(addr).await;
    let mut guest = join_room(addr, &mut host, &session_id).await;

    make_move(&mut host, &mut guest, &session_id, 1, 1).await;
    make_move(&mut guest, &mut host, &session_id, 2, 2).await;

    send_json(
        &mut guest,
        json!({ "action": "restart", "data": { "sessionId": session_id } }),
    )
    .await;

    let direct = recv_json(&mut guest).await;
    let published = recv_json(&mut host).await;
    for outcome in [&direct, &published] {
        assert_eq!(outcome["action"], "restarted");
        assert_eq!(outcome["session"]["points"].as_array().map(Vec::len), Some(0));
        assert_eq!(outcome["session"]["currentMove"], "cross");
        // Rules survive the restart untouched.
        assert_eq!(outcome["session"]["fieldRules"]["pointsInRowToWin"], 3);
    }
}

#[tokio::test]
async fn test_end_session_notifies_other_participant() {
    let addr = spawn_engine(8).await;
    let (mut host, session_id) = create_default_room(addr).await;
    let mut guest = join_room(addr, &mut host, &session_id).await;

    send_json(
        &mut guest,
        json!({ "action": "end-session", "data": { "sessionId": session_id } }),
    )
    .await;

    let direct = recv_json(&mut guest).await;
    let published = recv_json(&mut host).await;
    assert_eq!(direct["action"], "session-ended");
    assert_eq!(published["action"], "session-ended");
    assert_eq!(published["sessionId"], session_id.as_str());

    // The room is gone for everyone afterwards.
    send_json(
        &mut host,
        json!({
            "action": "make-move",
            "data": { "sessionId": session_id, "move": { "x": 1, "y": 1 } }
        }),
    )
    .await;
    let error = recv_json(&mut host).await;
    assert_eq!(error["message"], "Room does not exist");
}

#[tokio::test]
async fn test_disconnect_of_both_participants_tears_down_session() {
    let addr = spawn_engine(8).await;
    let (mut host, session_id) = create_default_room(addr).await;
    let mut guest = join_room(addr, &mut host, &session_id).await;

    host.close(None).await.expect("host closes");
    guest.close(None).await.expect("guest closes");

    // Cleanup runs as each socket unwinds; poll until the code is gone.
    for attempt in 0..50 {
        let mut probe = connect(addr).await;
        send_json(
            &mut probe,
            json!({ "action": "join-room", "data": { "sessionId": session_id } }),
        )
        .await;
        let response = recv_json(&mut probe).await;

        if response["message"] == "Room does not exist" {
            return;
        }
        assert!(
            attempt < 49,
            "session still resolvable after both disconnects: {response}"
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

#[tokio::test]
async fn test_malformed_payload_reports_parse_error() {
    let addr = spawn_engine(8).await;
    let mut client = connect(addr).await;

    send_json(&mut client, json!({ "action": "self-destruct", "data": {} })).await;

    let error = recv_json(&mut client).await;
    assert_eq!(error["action"], "error");
    assert!(error["message"]
        .as_str()
        .expect("message present")
        .starts_with("Invalid message format"));
    assert!(error["timestamp"].as_i64().is_some());
}

#[tokio::test]
async fn test_infinite_play_keeps_footprint_bounded() {
    let addr = spawn_engine(8).await;
    let mut host = connect(addr).await;
    send_json(
        &mut host,
        json!({
            "action": "create-room",
            "data": {
                "fieldRules": { "columns": 10, "rows": 10, "pointsInRowToWin": 3 },
                "gameFeatures": { "infinitePlay": true }
            }
        }),
    )
    .await;
    let created = recv_json(&mut host).await;
    let session_id = created["session"]["sessionId"]
        .as_str()
        .expect("session id present")
        .to_string();
    let mut guest = join_room(addr, &mut host, &session_id).await;

    // Cross takes odd columns along y=1, circle along y=5; the gaps keep any
    // line of three from forming.
    let mut last = None;
    for i in 0..8 {
        let (x, y) = if i % 2 == 0 { (i + 1, 1) } else { (i, 5) };
        let (direct, _) = if i % 2 == 0 {
            make_move(&mut host, &mut guest, &session_id, x, y).await
        } else {
            make_move(&mut guest, &mut host, &session_id, x, y).await
        };
        last = Some(direct);
    }

    let session = &last.expect("moves were played")["session"];
    let points = session["points"].as_array().expect("points array");
    let cross_count = points.iter().filter(|p| p["player"] == "cross").count();
    assert_eq!(cross_count, 3, "4th cross point evicted the oldest");
    assert!(
        !points
            .iter()
            .any(|p| p["X"] == 1 && p["Y"] == 1 && p["player"] == "cross"),
        "cross's first point is the one that went away"
    );
}
