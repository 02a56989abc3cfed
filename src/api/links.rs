use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::models::content::{Resource, SocialLink};

pub async fn list_resources(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Resource>>>, ApiError> {
    let resources = state.store().list_resources().await?;
    Ok(Json(ApiResponse::success(resources)))
}

pub async fn list_social_links(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SocialLink>>>, ApiError> {
    let links = state.store().list_social_links().await?;
    Ok(Json(ApiResponse::success(links)))
}
