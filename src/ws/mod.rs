//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` provides bidirectional communication
//! for league-filtered event subscriptions and stats queries.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
