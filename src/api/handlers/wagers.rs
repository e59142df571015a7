//! Wager handlers: log, batch, list, get, resolve, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{BatchResponse, PaginationParams, ResolveRequest, WagerListResponse};
use crate::app_state::AppState;
use crate::domain::{NewWager, Wager, WagerFilter, WagerId};
use crate::error::{ErrorResponse, TrackerError};

/// `POST /wagers` — Log a new wager.
///
/// # Errors
///
/// Returns [`TrackerError`] on invalid odds, stake, or result.
#[utoipa::path(
    post,
    path = "/api/v1/wagers",
    tag = "Wagers",
    summary = "Log a wager",
    description = "Creates a wager. Missing odds and stake fall back to the configured defaults; a missing result means pending.",
    request_body = NewWager,
    responses(
        (status = 201, description = "Wager logged", body = Wager),
        (status = 400, description = "Invalid odds, stake, or result", body = ErrorResponse),
    )
)]
pub async fn create_wager(
    State(state): State<AppState>,
    Json(req): Json<NewWager>,
) -> Result<impl IntoResponse, TrackerError> {
    let wager = state.wager_service.add_wager(req).await?;
    Ok((StatusCode::CREATED, Json(wager)))
}

/// `POST /wagers/batch` — Log several wagers at once.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidRequest`] naming the first bad entry.
#[utoipa::path(
    post,
    path = "/api/v1/wagers/batch",
    tag = "Wagers",
    summary = "Log a batch of wagers",
    description = "Validates every entry before adding any; a failed save adds none. Returns the number of rows added.",
    request_body = Vec<NewWager>,
    responses(
        (status = 200, description = "Batch logged", body = BatchResponse),
        (status = 400, description = "An entry failed validation", body = ErrorResponse),
    )
)]
pub async fn create_batch(
    State(state): State<AppState>,
    Json(batch): Json<Vec<NewWager>>,
) -> Result<Json<BatchResponse>, TrackerError> {
    if batch.is_empty() {
        return Err(TrackerError::InvalidRequest("batch is empty".to_string()));
    }
    let added = state.wager_service.add_batch(batch).await?;
    Ok(Json(BatchResponse {
        status: "ok".to_string(),
        rows_added: added.len(),
    }))
}

/// `GET /wagers` — List wagers with filter and pagination.
#[utoipa::path(
    get,
    path = "/api/v1/wagers",
    tag = "Wagers",
    summary = "List wagers",
    description = "Returns wagers newest-created first, optionally filtered by league, result, or a search string over matchup and selection.",
    params(WagerFilter, PaginationParams),
    responses(
        (status = 200, description = "Paginated wager list", body = WagerListResponse),
    )
)]
pub async fn list_wagers(
    State(state): State<AppState>,
    Query(filter): Query<WagerFilter>,
    Query(params): Query<PaginationParams>,
) -> Json<WagerListResponse> {
    let wagers = state.wager_service.list_wagers(&filter).await;
    let (data, pagination) = params.paginate(wagers);
    Json(WagerListResponse { data, pagination })
}

/// `GET /wagers/{id}` — Get a single wager.
///
/// # Errors
///
/// Returns [`TrackerError::WagerNotFound`] if the wager does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/wagers/{id}",
    tag = "Wagers",
    summary = "Get a wager",
    params(
        ("id" = uuid::Uuid, Path, description = "Wager UUID"),
    ),
    responses(
        (status = 200, description = "Wager details", body = Wager),
        (status = 404, description = "Wager not found", body = ErrorResponse),
    )
)]
pub async fn get_wager(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<Wager>, TrackerError> {
    let wager = state.wager_service.get_wager(WagerId::from_uuid(id)).await?;
    Ok(Json(wager))
}

/// `POST /wagers/{id}/resolve` — Settle or void a pending wager.
///
/// # Errors
///
/// Returns [`TrackerError::WagerNotFound`] or
/// [`TrackerError::InvalidStateTransition`].
#[utoipa::path(
    post,
    path = "/api/v1/wagers/{id}/resolve",
    tag = "Wagers",
    summary = "Resolve a wager",
    description = "Moves a pending wager to win, loss, or push and computes its P&L. Resolving to void deletes the wager.",
    params(
        ("id" = uuid::Uuid, Path, description = "Wager UUID"),
    ),
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Resolved wager", body = Wager),
        (status = 404, description = "Wager not found", body = ErrorResponse),
        (status = 409, description = "Wager is not pending", body = ErrorResponse),
    )
)]
pub async fn resolve_wager(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<Wager>, TrackerError> {
    let wager = state
        .wager_service
        .resolve_wager(WagerId::from_uuid(id), req.result)
        .await?;
    Ok(Json(wager))
}

/// `DELETE /wagers/{id}` — Delete a wager.
///
/// # Errors
///
/// Returns [`TrackerError::WagerNotFound`] if the wager does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/wagers/{id}",
    tag = "Wagers",
    summary = "Delete a wager",
    params(
        ("id" = uuid::Uuid, Path, description = "Wager UUID"),
    ),
    responses(
        (status = 204, description = "Wager deleted"),
        (status = 404, description = "Wager not found", body = ErrorResponse),
    )
)]
pub async fn delete_wager(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<StatusCode, TrackerError> {
    state
        .wager_service
        .remove_wager(WagerId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Wager management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wagers", post(create_wager).get(list_wagers))
        .route("/wagers/batch", post(create_batch))
        .route("/wagers/{id}", get(get_wager).delete(delete_wager))
        .route("/wagers/{id}/resolve", post(resolve_wager))
}
