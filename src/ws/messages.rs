//! WebSocket message types: envelope, commands, and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket, carried in the
/// envelope's `payload`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to events for specific leagues.
    Subscribe {
        /// League codes to subscribe to (e.g. `"NBA"`). Use `["*"]` for all.
        leagues: Vec<String>,
    },
    /// Unsubscribe from events for specific leagues.
    Unsubscribe {
        /// League codes to unsubscribe from. `"*"` clears the wildcard.
        leagues: Vec<String>,
    },
    /// Request current dashboard stats.
    GetStats {
        /// Recent-results window; defaults to the configured limit.
        #[serde(default)]
        recent: Option<usize>,
    },
}

impl WsMessage {
    /// Builds a server message of the given type with a fresh timestamp.
    #[must_use]
    pub fn new(id: impl Into<String>, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error message with a numeric code.
    #[must_use]
    pub fn error(id: impl Into<String>, code: u32, message: impl Into<String>) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message.into() }),
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscribe_command() {
        let payload = serde_json::json!({ "command": "subscribe", "leagues": ["NBA", "*"] });
        let Ok(cmd) = serde_json::from_value::<WsCommand>(payload) else {
            panic!("subscribe should parse");
        };
        assert_eq!(
            cmd,
            WsCommand::Subscribe {
                leagues: vec!["NBA".to_string(), "*".to_string()]
            }
        );
    }

    #[test]
    fn get_stats_recent_is_optional() {
        let payload = serde_json::json!({ "command": "get_stats" });
        let Ok(cmd) = serde_json::from_value::<WsCommand>(payload) else {
            panic!("get_stats should parse");
        };
        assert_eq!(cmd, WsCommand::GetStats { recent: None });
    }

    #[test]
    fn error_envelope_shape() {
        let msg = WsMessage::error("abc", 400, "bad");
        let Ok(json) = serde_json::to_value(&msg) else {
            panic!("serializes");
        };
        assert_eq!(json["type"], "error");
        assert_eq!(json["id"], "abc");
        assert_eq!(json["payload"]["code"], 400);
    }
}
