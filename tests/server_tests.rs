//! End-to-end tests against a live server on an ephemeral port.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use wager_tracker::config::TrackerConfig;
use wager_tracker::{build_app, build_state};

async fn spawn_server() -> SocketAddr {
    let Ok(state) = build_state(&TrackerConfig::default()).await else {
        panic!("in-memory state should build");
    };
    let app = build_app(state, Duration::from_secs(5));
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

fn command(id: &str, payload: Value) -> Message {
    let envelope = json!({
        "id": id,
        "type": "command",
        "timestamp": chrono::Utc::now(),
        "payload": payload,
    });
    Message::text(envelope.to_string())
}

async fn next_json<S>(ws: &mut S) -> Value
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let next = tokio::time::timeout(Duration::from_secs(5), ws.next()).await;
        let Ok(Some(Ok(msg))) = next else {
            panic!("expected a websocket message");
        };
        if let Ok(text) = msg.to_text()
            && !text.is_empty()
        {
            let Ok(value) = serde_json::from_str(text) else {
                panic!("server sent invalid JSON: {text}");
            };
            return value;
        }
    }
}

#[tokio::test]
async fn rest_round_trip_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let Ok(created) = client
        .post(format!("http://{addr}/api/v1/wagers"))
        .json(&json!({ "matchup": "Yankees vs Red Sox", "league": "MLB", "odds": 120 }))
        .send()
        .await
    else {
        panic!("create request failed");
    };
    assert_eq!(created.status(), reqwest::StatusCode::CREATED);
    let Ok(wager) = created.json::<Value>().await else {
        panic!("create body");
    };
    let Some(id) = wager["id"].as_str() else {
        panic!("id missing");
    };

    let Ok(resolved) = client
        .post(format!("http://{addr}/api/v1/wagers/{id}/resolve"))
        .json(&json!({ "result": "win" }))
        .send()
        .await
    else {
        panic!("resolve request failed");
    };
    assert!(resolved.status().is_success());

    let Ok(stats) = client
        .get(format!("http://{addr}/api/v1/stats"))
        .send()
        .await
    else {
        panic!("stats request failed");
    };
    let Ok(stats) = stats.json::<Value>().await else {
        panic!("stats body");
    };
    assert_eq!(stats["total_pnl"], 1.2);
    assert_eq!(stats["current_streak"]["type"], "W");
    assert_eq!(stats["current_streak"]["count"], 1);
}

#[tokio::test]
async fn websocket_receives_league_events() {
    let addr = spawn_server().await;
    let Ok((mut ws, _)) = connect_async(format!("ws://{addr}/ws")).await else {
        panic!("websocket connect failed");
    };

    let subscribe = command("sub-1", json!({ "command": "subscribe", "leagues": ["NBA"] }));
    assert!(ws.send(subscribe).await.is_ok());
    let ack = next_json(&mut ws).await;
    assert_eq!(ack["type"], "response");
    assert_eq!(ack["id"], "sub-1");
    assert_eq!(ack["payload"]["subscribed"], json!(["NBA"]));

    let client = reqwest::Client::new();
    for league in ["NFL", "NBA"] {
        let Ok(response) = client
            .post(format!("http://{addr}/api/v1/wagers"))
            .json(&json!({ "league": league }))
            .send()
            .await
        else {
            panic!("create request failed");
        };
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    // NFL creation is filtered out; its stats update is not.
    let first = next_json(&mut ws).await;
    assert_eq!(first["payload"]["event_type"], "stats_updated");
    assert_eq!(first["payload"]["stats"]["total_bets"], 0);

    let second = next_json(&mut ws).await;
    assert_eq!(second["type"], "event");
    assert_eq!(second["payload"]["event_type"], "wager_created");
    assert_eq!(second["payload"]["league"], "NBA");

    let stats = command("stats-1", json!({ "command": "get_stats" }));
    assert!(ws.send(stats).await.is_ok());
    loop {
        let reply = next_json(&mut ws).await;
        if reply["id"] == "stats-1" {
            assert_eq!(reply["type"], "response");
            assert_eq!(reply["payload"]["total_bets"], 0);
            break;
        }
    }
}

#[tokio::test]
async fn websocket_rejects_unknown_command() {
    let addr = spawn_server().await;
    let Ok((mut ws, _)) = connect_async(format!("ws://{addr}/ws")).await else {
        panic!("websocket connect failed");
    };

    assert!(ws.send(command("x", json!({ "command": "swap" }))).await.is_ok());
    let reply = next_json(&mut ws).await;
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["payload"]["code"], 404);

    assert!(ws.send(Message::text("not json")).await.is_ok());
    let reply = next_json(&mut ws).await;
    assert_eq!(reply["payload"]["message"], "malformed JSON");
}
