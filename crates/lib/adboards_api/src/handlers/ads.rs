//! Ad request handlers.
//!
//! Mutations fetch the ad, run the ownership gate against the caller's
//! claims, and only then touch the row.

use axum::Json;
use axum::extract::{Multipart, Path, State};

use adboards_core::access::{AdAction, check_ad_owner};
use adboards_core::ads::{self, AdPatch, NewAd};
use adboards_core::favorites;
use adboards_core::models::Ad;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extractors::{CurrentPerson, MaybePerson};
use crate::handlers::people::save_photo_field;
use crate::models::{AdDetails, AddAdRequest, SuccessResponse, UpdateAdRequest};

/// `GET /api/ads` — public listing of all ads.
pub async fn list_ads_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Ad>>> {
    let all = ads::list_ads(&state.pool).await?;
    Ok(Json(all))
}

/// `GET /api/ads/{id}` — public single-ad lookup. Signed-in callers also
/// learn whether they favorited it.
pub async fn get_ad_handler(
    State(state): State<AppState>,
    MaybePerson(claims): MaybePerson,
    Path(id): Path<i32>,
) -> AppResult<Json<AdDetails>> {
    let ad = ads::find_ad(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ad not found".into()))?;

    let is_favorite = match &claims {
        Some(c) => favorites::is_favorite(&state.pool, c.id, id).await?,
        None => false,
    };

    Ok(Json(AdDetails { ad, is_favorite }))
}

/// `GET /api/me/ads` — the caller's own ads.
pub async fn my_ads_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
) -> AppResult<Json<Vec<Ad>>> {
    let mine = ads::list_ads_by_person(&state.pool, claims.id).await?;
    Ok(Json(mine))
}

/// `GET /api/me/favorites` — ads the caller marked favorite.
pub async fn favorite_ads_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
) -> AppResult<Json<Vec<Ad>>> {
    let favs = ads::list_favorite_ads(&state.pool, claims.id).await?;
    Ok(Json(favs))
}

/// `POST /api/ads` — create an ad owned by the caller. The owner comes from
/// the verified claims, never from the body.
pub async fn create_ad_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
    Json(body): Json<AddAdRequest>,
) -> AppResult<Json<Ad>> {
    let new = NewAd {
        price: body.price,
        name: body.name,
        description: body.description,
        city: body.city,
        category_id: body.category_id,
        ad_type_id: body.ad_type_id,
    };
    let ad = ads::create_ad(&state.pool, &new, claims.id, &state.photos.placeholder()).await?;
    Ok(Json(ad))
}

/// `PUT /api/ads/{id}` — partial update. Owner only; no admin override.
pub async fn update_ad_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
    Path(id): Path<i32>,
    Json(body): Json<UpdateAdRequest>,
) -> AppResult<Json<Ad>> {
    let ad = ads::find_ad(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ad not found".into()))?;

    check_ad_owner(ad.person_id, &claims, AdAction::Update)?;

    let patch = AdPatch {
        price: body.price,
        name: body.name,
        description: body.description,
        city: body.city,
        category_id: body.category_id,
        ad_type_id: body.ad_type_id,
    };
    let updated = ads::update_ad(&state.pool, id, &patch).await?;
    Ok(Json(updated))
}

/// `PUT /api/ads/{id}/photo` — replace an ad's photo. Owner only; no admin
/// override.
pub async fn update_ad_photo_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<Ad>> {
    let ad = ads::find_ad(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ad not found".into()))?;

    check_ad_owner(ad.person_id, &claims, AdAction::UpdatePhoto)?;

    let photo_name = save_photo_field(&state, multipart).await?;
    let updated = ads::set_ad_photo(&state.pool, id, &photo_name).await?;
    Ok(Json(updated))
}

/// `DELETE /api/ads/{id}` — remove an ad. Owner, or any admin (the one
/// operation where the admin role bypasses ownership). A junk role claim is
/// a bad request.
pub async fn delete_ad_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
    Path(id): Path<i32>,
) -> AppResult<Json<SuccessResponse>> {
    let ad = ads::find_ad(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ad not found".into()))?;

    check_ad_owner(ad.person_id, &claims, AdAction::Delete)?;

    ads::delete_ad(&state.pool, id).await?;
    Ok(Json(SuccessResponse { success: true }))
}
