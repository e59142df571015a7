//! Stats handlers: dashboard, exposure, weekly breakdown.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{StatsQuery, WeeklyQuery};
use crate::app_state::AppState;
use crate::stats::{DashboardStats, ExposureSummary, WeekBreakdown};

/// `GET /stats` — Dashboard aggregates over all wagers.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "Stats",
    summary = "Dashboard stats",
    description = "P&L, ROI, win rate, streaks, per-league breakdown, recent results, and the bankroll curve, computed over settled wagers.",
    params(StatsQuery),
    responses(
        (status = 200, description = "Dashboard stats", body = DashboardStats),
    )
)]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Json<DashboardStats> {
    let stats = match query.recent {
        Some(limit) => state.wager_service.stats_with(limit).await,
        None => state.wager_service.stats().await,
    };
    Json(stats)
}

/// `GET /stats/exposure` — Units at risk on pending wagers.
#[utoipa::path(
    get,
    path = "/api/v1/stats/exposure",
    tag = "Stats",
    summary = "Open exposure",
    responses(
        (status = 200, description = "Pending exposure", body = ExposureSummary),
    )
)]
pub async fn get_exposure(State(state): State<AppState>) -> Json<ExposureSummary> {
    Json(state.wager_service.exposure().await)
}

/// `GET /stats/weekly` — Monday to Sunday breakdown.
#[utoipa::path(
    get,
    path = "/api/v1/stats/weekly",
    tag = "Stats",
    summary = "Weekly breakdown",
    description = "Per-day units and bet counts for the week containing `date` (default: today).",
    params(WeeklyQuery),
    responses(
        (status = 200, description = "Weekly breakdown", body = WeekBreakdown),
    )
)]
pub async fn get_weekly(
    State(state): State<AppState>,
    Query(query): Query<WeeklyQuery>,
) -> Json<WeekBreakdown> {
    let day = query
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    Json(state.wager_service.week_breakdown(day).await)
}

/// Stats routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/stats/exposure", get(get_exposure))
        .route("/stats/weekly", get(get_weekly))
}
