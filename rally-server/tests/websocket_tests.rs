use std::time::Duration;

use futures_util::StreamExt;
use tokio::time::timeout;

use rally_server::create_routes;
use rally_server::session::SessionHub;
use rally_types::{ClientMessage, ServerMessage, TeamDraft};

fn create_message() -> ClientMessage {
    ClientMessage::CreateSession {
        team_one: TeamDraft {
            name: String::new(),
            words: "cat\ndog".to_string(),
        },
        team_two: TeamDraft {
            name: "Beta".to_string(),
            words: "bird".to_string(),
        },
    }
}

async fn recv_server_message(client: &mut warp::test::WsClient) -> ServerMessage {
    let frame = timeout(Duration::from_secs(1), client.next())
        .await
        .expect("Timeout waiting for a frame")
        .expect("WebSocket closed")
        .expect("WebSocket error");
    serde_json::from_str(frame.to_str().expect("expected a text frame")).expect("invalid JSON")
}

#[tokio::test]
async fn test_health_endpoint() {
    let handle = SessionHub::spawn();
    let routes = create_routes(handle);

    let response = warp::test::request().path("/health").reply(&routes).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.body().as_ref(), &b"OK"[..]);
}

#[tokio::test]
async fn test_session_round_trip_over_websocket() {
    let handle = SessionHub::spawn();
    let routes = create_routes(handle);

    let mut client = warp::test::ws()
        .path("/ws")
        .handshake(routes)
        .await
        .expect("WebSocket handshake failed");

    client
        .send(warp::ws::Message::text(
            serde_json::to_string(&create_message()).unwrap(),
        ))
        .await;

    match recv_server_message(&mut client).await {
        ServerMessage::SessionUpdate { state, teams, .. } => {
            assert!(!state.is_playing);
            // A blank name falls back to the default
            assert_eq!(teams[0].name, "NOVA");
            assert_eq!(teams[1].name, "Beta");
            assert_eq!(teams[0].words.len(), 3);
        }
        other => panic!("expected SessionUpdate, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_payload_gets_an_error_reply() {
    let handle = SessionHub::spawn();
    let routes = create_routes(handle);

    let mut client = warp::test::ws()
        .path("/ws")
        .handshake(routes)
        .await
        .expect("WebSocket handshake failed");

    client.send(warp::ws::Message::text("not json")).await;

    match recv_server_message(&mut client).await {
        ServerMessage::Error { message } => assert!(message.contains("Invalid")),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_every_console_mirrors_the_session() {
    let handle = SessionHub::spawn();
    let routes = create_routes(handle);

    let mut first = warp::test::ws()
        .path("/ws")
        .handshake(routes.clone())
        .await
        .expect("WebSocket handshake failed");
    let mut second = warp::test::ws()
        .path("/ws")
        .handshake(routes)
        .await
        .expect("WebSocket handshake failed");

    first
        .send(warp::ws::Message::text(
            serde_json::to_string(&create_message()).unwrap(),
        ))
        .await;

    // Both consoles see the same snapshot
    for client in [&mut first, &mut second] {
        match recv_server_message(client).await {
            ServerMessage::SessionUpdate { teams, .. } => {
                assert_eq!(teams[0].name, "NOVA");
            }
            other => panic!("expected SessionUpdate, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_late_joiner_is_brought_up_to_date() {
    let handle = SessionHub::spawn();
    let routes = create_routes(handle);

    let mut first = warp::test::ws()
        .path("/ws")
        .handshake(routes.clone())
        .await
        .expect("WebSocket handshake failed");

    first
        .send(warp::ws::Message::text(
            serde_json::to_string(&create_message()).unwrap(),
        ))
        .await;
    match recv_server_message(&mut first).await {
        ServerMessage::SessionUpdate { .. } => {}
        other => panic!("expected SessionUpdate, got {:?}", other),
    }

    // Connecting after the fact triggers a snapshot for the newcomer
    let mut second = warp::test::ws()
        .path("/ws")
        .handshake(routes)
        .await
        .expect("WebSocket handshake failed");

    match recv_server_message(&mut second).await {
        ServerMessage::SessionUpdate { teams, .. } => {
            assert_eq!(teams[1].name, "Beta");
        }
        other => panic!("expected SessionUpdate, got {:?}", other),
    }
}
