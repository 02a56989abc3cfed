use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::validation::validate_daily_status;
use super::{ApiError, ApiResponse, AppState, Payload};
use crate::models::content::{DailyStatus, DailyStatusInput};

/// GET /daily-status
/// The most recent status by date.
pub async fn get_latest(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DailyStatus>>, ApiError> {
    let status = state
        .store()
        .latest_daily_status()
        .await?
        .ok_or_else(|| ApiError::not_found("No daily status found"))?;

    Ok(Json(ApiResponse::success(status)))
}

/// GET /daily-status/history
pub async fn get_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<DailyStatus>>>, ApiError> {
    let statuses = state.store().list_daily_status().await?;
    Ok(Json(ApiResponse::success(statuses)))
}

/// POST /daily-status
/// Creates or overwrites the status for the given date.
pub async fn save_daily_status(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<(StatusCode, Json<ApiResponse<DailyStatus>>), ApiError> {
    validate_daily_status(&payload.0)?;
    let input: DailyStatusInput = payload.into_typed()?;

    let status = state.store().upsert_daily_status(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            status,
            "Daily status saved successfully",
        )),
    ))
}
