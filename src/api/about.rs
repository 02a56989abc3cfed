use axum::{Json, extract::State};
use std::sync::Arc;

use super::validation::validate_about;
use super::{AboutDto, ApiError, ApiResponse, AppState, Payload};
use crate::models::content::AboutInput;

/// GET /about
pub async fn get_about(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<AboutDto>>, ApiError> {
    let about = state
        .store()
        .get_about()
        .await?
        .ok_or_else(|| ApiError::not_found("No about content found"))?;

    Ok(Json(ApiResponse::success(about.into())))
}

/// PUT /about
/// Fields left out of the body keep their stored values.
pub async fn update_about(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<Json<ApiResponse<AboutDto>>, ApiError> {
    validate_about(&payload.0)?;
    let input: AboutInput = payload.into_typed()?;

    let about = state.store().upsert_about(&input).await?;

    Ok(Json(ApiResponse::success_with_message(
        about.into(),
        "About content updated successfully",
    )))
}
