//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All resource endpoints are mounted under `/api/v1`; system endpoints
//! live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "wager-tracker",
        description = "Personal sports-wager tracker: log wagers, resolve them, and read dashboard stats."
    ),
    paths(
        handlers::system::health_handler,
        handlers::system::leagues_handler,
        handlers::wagers::create_wager,
        handlers::wagers::create_batch,
        handlers::wagers::list_wagers,
        handlers::wagers::get_wager,
        handlers::wagers::resolve_wager,
        handlers::wagers::delete_wager,
        handlers::stats::get_stats,
        handlers::stats::get_exposure,
        handlers::stats::get_weekly,
    ),
    components(schemas(ErrorResponse, ErrorBody)),
    tags(
        (name = "System", description = "Health and catalog endpoints"),
        (name = "Wagers", description = "Wager lifecycle"),
        (name = "Stats", description = "Derived statistics"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}
