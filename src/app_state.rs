//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::WagerService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Wager service for all business logic.
    pub wager_service: Arc<WagerService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Builds state around a service, sharing its event bus.
    #[must_use]
    pub fn new(wager_service: Arc<WagerService>) -> Self {
        let event_bus = wager_service.event_bus().clone();
        Self {
            wager_service,
            event_bus,
        }
    }
}
