//! History endpoints.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use super::ApiResult;
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::{HistoryListResponse, HistoryQuery, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
use crate::AppState;

/// GET /api/history - List the caller's history, newest first.
pub async fn list_history(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Json<HistoryListResponse>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {}",
            MAX_HISTORY_LIMIT
        )));
    }

    let items = state.repo.find_by_user_id(&user_id, limit).await?;
    Ok(Json(HistoryListResponse { items }))
}

/// DELETE /api/history/{id} - Delete one history record owned by the caller.
pub async fn delete_history(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.repo.delete_by_id(&id, &user_id).await? {
        tracing::info!(user_id = %user_id, id = %id, "Deleted history record");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(
            "History record not found or cannot be deleted.".to_string(),
        ))
    }
}
