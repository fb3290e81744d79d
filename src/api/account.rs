//! Account endpoints.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::auth::CurrentUser;
use crate::models::DeleteAccountResponse;
use crate::AppState;

/// POST /api/auth/delete-account - Purge the caller's stored history.
///
/// Removing the identity itself is the auth gateway's job.
pub async fn delete_account(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<DeleteAccountResponse>> {
    let deleted = state.repo.delete_all_for_user(&user_id).await?;
    tracing::info!(user_id = %user_id, deleted, "Purged history for deleted account");

    Ok(Json(DeleteAccountResponse {
        success: true,
        deleted,
    }))
}
