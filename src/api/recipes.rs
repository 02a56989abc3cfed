use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{recipe_key, validate_recipe};
use super::{ApiError, ApiResponse, AppState, Payload};
use crate::models::recipe::{AdjacentRecipes, NewRecipe, Recipe, RecipeChanges};

async fn find_recipe(state: &AppState, id_or_slug: &str) -> Result<Recipe, ApiError> {
    state
        .store()
        .get_recipe(&recipe_key(id_or_slug))
        .await?
        .ok_or_else(ApiError::recipe_not_found)
}

/// GET /recipes
pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Recipe>>>, ApiError> {
    let recipes = state.store().list_recipes().await?;
    Ok(Json(ApiResponse::success(recipes)))
}

/// GET /recipes/{id}
/// Accepts either the UUID or the slug.
pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Recipe>>, ApiError> {
    let recipe = find_recipe(&state, &id).await?;
    Ok(Json(ApiResponse::success(recipe)))
}

/// GET /recipes/{id}/adjacent
pub async fn get_adjacent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AdjacentRecipes>>, ApiError> {
    let recipe = find_recipe(&state, &id).await?;
    let adjacent = state.store().adjacent_recipes(recipe.entry_number).await?;
    Ok(Json(ApiResponse::success(adjacent)))
}

/// POST /recipes
pub async fn create_recipe(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<(StatusCode, Json<ApiResponse<Recipe>>), ApiError> {
    validate_recipe(&payload.0, false)?;
    let new_recipe: NewRecipe = payload.into_typed()?;

    let recipe = state.store().create_recipe(&new_recipe).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            recipe,
            "Recipe created successfully",
        )),
    ))
}

/// PUT /recipes/{id}
pub async fn update_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<Json<ApiResponse<Recipe>>, ApiError> {
    validate_recipe(&payload.0, true)?;
    let changes: RecipeChanges = payload.into_typed()?;

    let existing = find_recipe(&state, &id).await?;
    let recipe = state
        .store()
        .update_recipe(&existing.id, &changes)
        .await?
        .ok_or_else(ApiError::recipe_not_found)?;

    Ok(Json(ApiResponse::success_with_message(
        recipe,
        "Recipe updated successfully",
    )))
}

/// DELETE /recipes/{id}
pub async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let existing = find_recipe(&state, &id).await?;

    if !state.store().delete_recipe(&existing.id).await? {
        return Err(ApiError::recipe_not_found());
    }

    Ok(Json(ApiResponse::message("Recipe deleted successfully")))
}
