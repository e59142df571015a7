//! # wager-tracker
//!
//! Personal sports-wager tracker: a REST and WebSocket service around a
//! pure statistics engine.
//!
//! Wagers are logged, resolved through a small state machine
//! (pending → win / loss / push / void), and summarized into dashboard
//! stats: P&L, ROI, win rate, streaks, per-league breakdown, recent
//! results, and a bankroll curve.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── WagerService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── WagerStore (domain/)  ──►  stats engine (stats/)
//!     │
//!     └── SQLite key/value slot (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod stats;
pub mod ws;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::TrackerConfig;
use crate::domain::{EventBus, WagerStore};
use crate::error::TrackerError;
use crate::persistence::SqliteSlotStore;
use crate::service::{Persistence, WagerService};

/// Builds the [`AppState`] for `config`: opens persistence when enabled,
/// loads the stored wagers, and wires the service to a fresh event bus.
///
/// # Errors
///
/// Returns a [`TrackerError::PersistenceError`] if the database cannot be
/// opened or read.
pub async fn build_state(config: &TrackerConfig) -> Result<AppState, TrackerError> {
    let (persistence, wagers) = if config.persistence_enabled {
        let slot_store = SqliteSlotStore::connect(
            &config.database_url,
            config.database_max_connections,
            Duration::from_secs(config.database_connect_timeout_secs),
        )
        .await?;
        let persistence = Persistence::new(slot_store, config.storage_slot.clone());
        let wagers = persistence.load().await?;
        (Some(persistence), wagers)
    } else {
        tracing::info!("persistence disabled, wagers kept in memory only");
        (None, Vec::new())
    };

    let store = Arc::new(WagerStore::with_wagers(wagers, config.wager_defaults));
    let event_bus = EventBus::new(config.event_bus_capacity);
    let service = WagerService::new(
        store,
        event_bus,
        persistence,
        config.recent_results_limit,
    );
    Ok(AppState::new(Arc::new(service)))
}

/// Builds the full HTTP router: REST, WebSocket, and middleware layers.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    let router = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws::handler::ws_handler));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        )
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
