//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::{League, WagerEvent};
use crate::service::WagerService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<WagerEvent>,
    wager_service: Arc<WagerService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs, &wager_service).await;
                        if let Some(json) = encode(&reply)
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(wager_event) => {
                        if !subs.accepts(&wager_event) {
                            continue;
                        }
                        let Ok(payload) = serde_json::to_value(&wager_event) else {
                            continue;
                        };
                        let msg = WsMessage::new(
                            uuid::Uuid::new_v4().to_string(),
                            WsMessageType::Event,
                            payload,
                        );
                        if let Some(json) = encode(&msg)
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

fn encode(msg: &WsMessage) -> Option<String> {
    serde_json::to_string(msg).ok()
}

/// Handles a text message from the client and builds the reply.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    wager_service: &WagerService,
) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error("", 400, "malformed JSON");
    };
    if msg.msg_type != WsMessageType::Command {
        return WsMessage::error(msg.id, 400, "expected a command message");
    }
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return WsMessage::error(msg.id, 404, "unknown command");
    };

    match command {
        WsCommand::GetStats { recent } => {
            let stats = match recent {
                Some(limit) => wager_service.stats_with(limit).await,
                None => wager_service.stats().await,
            };
            match serde_json::to_value(&stats) {
                Ok(payload) => WsMessage::new(msg.id, WsMessageType::Response, payload),
                Err(e) => WsMessage::error(msg.id, 500, e.to_string()),
            }
        }
        other => apply_subscription(msg.id, other, subs),
    }
}

/// Applies a subscribe or unsubscribe command to `subs`.
fn apply_subscription(id: String, command: WsCommand, subs: &mut SubscriptionManager) -> WsMessage {
    let (subscribing, requested) = match command {
        WsCommand::Subscribe { leagues } => (true, leagues),
        WsCommand::Unsubscribe { leagues } => (false, leagues),
        WsCommand::GetStats { .. } => return WsMessage::error(id, 400, "not a subscription"),
    };

    let mut wildcard = false;
    let mut leagues = Vec::new();
    let mut rejected = Vec::new();
    for code in requested {
        if code == "*" {
            wildcard = true;
        } else {
            match code.parse::<League>() {
                Ok(league) => leagues.push(league),
                Err(_) => rejected.push(code),
            }
        }
    }

    if subscribing {
        subs.subscribe(&leagues, wildcard);
    } else {
        subs.unsubscribe(&leagues, wildcard);
    }
    let key = if subscribing { "subscribed" } else { "unsubscribed" };

    WsMessage::new(
        id,
        WsMessageType::Response,
        serde_json::json!({
            key: leagues,
            "rejected": rejected,
            "active": subs.leagues().collect::<Vec<_>>(),
            "wildcard": subs.is_subscribed_all(),
        }),
    )
}
