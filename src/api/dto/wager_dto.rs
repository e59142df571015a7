//! Wager DTOs for resolve, list, and batch operations.
//!
//! Creation reuses [`crate::domain::NewWager`] as its request body.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{BetResult, Wager};

/// Request body for `POST /wagers/{id}/resolve`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveRequest {
    /// Final outcome: `win`, `loss`, `push`, or `void`.
    pub result: BetResult,
}

/// Paginated list response for `GET /wagers`.
#[derive(Debug, Serialize, ToSchema)]
pub struct WagerListResponse {
    /// Wagers on this page, newest-created first.
    pub data: Vec<Wager>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Response body for `POST /wagers/batch`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchResponse {
    /// Always `"ok"` when returned.
    pub status: String,
    /// Number of wagers added.
    pub rows_added: usize,
}
