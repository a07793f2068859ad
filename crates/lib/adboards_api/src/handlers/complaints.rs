//! Complaint request handlers.

use axum::Json;
use axum::extract::{Path, State};

use adboards_core::ads;
use adboards_core::complaints;
use adboards_core::models::Complaint;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extractors::{AdminPerson, CurrentPerson};
use crate::models::ComplaintRequest;

/// `POST /api/ads/{id}/complaints` — file a complaint about a listing. The
/// reporter comes from the verified claims.
pub async fn file_complaint_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
    Path(ad_id): Path<i32>,
    Json(body): Json<ComplaintRequest>,
) -> AppResult<Json<Complaint>> {
    if body.text.trim().is_empty() {
        return Err(AppError::Validation("Complaint text must not be empty".into()));
    }
    if ads::find_ad(&state.pool, ad_id).await?.is_none() {
        return Err(AppError::NotFound("Ad not found".into()));
    }
    let complaint = complaints::file_complaint(&state.pool, ad_id, claims.id, &body.text).await?;
    Ok(Json(complaint))
}

/// `GET /api/ads/{id}/complaints` — complaints filed against a listing.
/// Admin only.
pub async fn list_ad_complaints_handler(
    State(state): State<AppState>,
    AdminPerson(_claims): AdminPerson,
    Path(ad_id): Path<i32>,
) -> AppResult<Json<Vec<Complaint>>> {
    if ads::find_ad(&state.pool, ad_id).await?.is_none() {
        return Err(AppError::NotFound("Ad not found".into()));
    }
    let list = complaints::list_complaints_for_ad(&state.pool, ad_id).await?;
    Ok(Json(list))
}
