//! Content persistence endpoint — the HTTP face of the dual-store
//! coordinator.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing::post};
use plotline_core::error::WriteError;
use plotline_core::item::{ContentItem, UserRef};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for a dual-store save.
#[derive(Debug, Deserialize)]
pub struct SaveContentRequest {
    /// The authenticated user, resolved upstream.
    pub user: UserRef,
    /// The item to persist.
    pub item: ContentItem,
}

/// POST / — persist one content item into both stores.
///
/// The body is always the `DualStorageResult`; the status code summarizes
/// it: 200 both saved, 422 rejected before any store I/O, 502 a store
/// refused the write. Only a failed rollback becomes a 500 error body.
async fn save_content(
    State(state): State<AppState>,
    Json(request): Json<SaveContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .coordinator
        .save_dual_storage(&request.item, &request.user)
        .await?;

    let status = if result.success {
        StatusCode::OK
    } else if matches!(
        result.primary_result.error,
        Some(WriteError::Validation { .. })
    ) {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::BAD_GATEWAY
    };

    Ok((status, Json(result)))
}

/// Returns the router for the content endpoints.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(save_content))
}
