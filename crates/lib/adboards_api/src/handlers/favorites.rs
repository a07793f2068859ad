//! Favorite request handlers.
//!
//! Favorites are always scoped to the caller's own (person, ad) pair; there
//! is no admin override on any of these.

use axum::Json;
use axum::extract::{Path, State};

use adboards_core::favorites;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extractors::CurrentPerson;
use crate::models::SuccessResponse;

/// `GET /api/favorites/{ad_id}` — whether the caller favorited the ad. A
/// missing pair reads as a bad request, matching the original contract.
pub async fn is_favorite_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
    Path(ad_id): Path<i32>,
) -> AppResult<Json<SuccessResponse>> {
    if favorites::is_favorite(&state.pool, claims.id, ad_id).await? {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(AppError::Validation("Not in favorites".into()))
    }
}

/// `POST /api/favorites/{ad_id}` — mark an ad favorite. A duplicate pair is
/// a bad request and creates no row.
pub async fn add_favorite_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
    Path(ad_id): Path<i32>,
) -> AppResult<Json<SuccessResponse>> {
    if favorites::is_favorite(&state.pool, claims.id, ad_id).await? {
        return Err(AppError::Validation("Already in favorites".into()));
    }
    favorites::add_favorite(&state.pool, claims.id, ad_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// `DELETE /api/favorites/{ad_id}` — remove the caller's own pair.
pub async fn remove_favorite_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
    Path(ad_id): Path<i32>,
) -> AppResult<Json<SuccessResponse>> {
    if !favorites::remove_favorite(&state.pool, claims.id, ad_id).await? {
        return Err(AppError::NotFound("Favorite not found".into()));
    }
    Ok(Json(SuccessResponse { success: true }))
}
