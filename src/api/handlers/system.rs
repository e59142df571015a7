//! System endpoints: health check and league catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::League;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// League catalog entry.
#[derive(Debug, Serialize, ToSchema)]
struct LeagueInfo {
    league: League,
    sport: &'static str,
}

/// `GET /config/leagues` — List supported leagues.
#[utoipa::path(
    get,
    path = "/config/leagues",
    tag = "System",
    summary = "List supported leagues",
    description = "Returns every league a wager can be tagged with, in display order.",
    responses(
        (status = 200, description = "League catalog", body = Vec<LeagueInfo>),
    )
)]
pub async fn leagues_handler() -> impl IntoResponse {
    let leagues: Vec<LeagueInfo> = League::ALL
        .iter()
        .map(|league| LeagueInfo {
            league: *league,
            sport: league.sport(),
        })
        .collect();
    (StatusCode::OK, Json(leagues))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/leagues", get(leagues_handler))
}
