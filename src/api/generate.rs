//! Generation endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use super::ApiResult;
use crate::auth::MaybeUser;
use crate::errors::AppError;
use crate::models::{GenerateRequestBody, GenerationResult, INVALID_GENERATE_REQUEST};
use crate::AppState;

/// POST /api/generate - Draft a blog post. Signed-in callers also get a history row.
pub async fn generate(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<GenerationResult>> {
    let invalid = || AppError::Validation(INVALID_GENERATE_REQUEST.to_string());

    let Ok(Json(value)) = body else {
        return Err(invalid());
    };
    if !value.is_object() {
        return Err(invalid());
    }
    let params = serde_json::from_value::<GenerateRequestBody>(value)
        .ok()
        .and_then(GenerateRequestBody::validate)
        .ok_or_else(invalid)?;

    tracing::info!(
        style = %params.style,
        keywords = params.keywords.len(),
        signed_in = user_id.is_some(),
        "Generating blog post"
    );

    let result = state
        .generator
        .execute(&params, user_id.as_deref())
        .await?;

    Ok(Json(result))
}
