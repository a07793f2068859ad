//! Person request handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};

use adboards_core::models::Person;
use adboards_core::people::{self, PersonPatch};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extractors::{AdminPerson, CurrentPerson};
use crate::models::{SuccessResponse, UpdatePersonRequest};

/// `GET /api/me` — the caller's own record.
pub async fn get_me_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
) -> AppResult<Json<Person>> {
    let person = people::find_person(&state.pool, claims.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Person not found".into()))?;
    Ok(Json(person))
}

/// `PUT /api/me` — update the caller's own profile. The target record comes
/// from the claims, never from the body, so ownership is implicit.
pub async fn update_me_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
    Json(body): Json<UpdatePersonRequest>,
) -> AppResult<Json<Person>> {
    let patch = PersonPatch {
        name: body.name,
        city: body.city,
        birthday: body.birthday,
        phone: body.phone,
        email: body.email,
    };
    let person = people::update_person(&state.pool, claims.id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Person not found".into()))?;
    Ok(Json(person))
}

/// `PUT /api/me/photo` — replace the caller's profile photo (multipart
/// field `photo`; no field resets to the placeholder).
pub async fn update_my_photo_handler(
    State(state): State<AppState>,
    CurrentPerson(claims): CurrentPerson,
    multipart: Multipart,
) -> AppResult<Json<Person>> {
    let photo_name = save_photo_field(&state, multipart).await?;
    let person = people::set_person_photo(&state.pool, claims.id, &photo_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Person not found".into()))?;
    Ok(Json(person))
}

/// `GET /api/people` — list all people. Admin only; empty store reads as
/// not found.
pub async fn list_people_handler(
    State(state): State<AppState>,
    AdminPerson(_claims): AdminPerson,
) -> AppResult<Json<Vec<Person>>> {
    let all = people::list_people(&state.pool).await?;
    if all.is_empty() {
        return Err(AppError::NotFound("No people registered".into()));
    }
    Ok(Json(all))
}

/// `GET /api/people/count` — number of registered people. Admin only.
pub async fn count_people_handler(
    State(state): State<AppState>,
    AdminPerson(_claims): AdminPerson,
) -> AppResult<Json<i64>> {
    let count = people::count_people(&state.pool).await?;
    if count == 0 {
        return Err(AppError::NotFound("No people registered".into()));
    }
    Ok(Json(count))
}

/// `DELETE /api/people/{login}` — remove an account. Admin only; owned ads
/// and favorites cascade at the store level.
pub async fn delete_person_handler(
    State(state): State<AppState>,
    AdminPerson(_claims): AdminPerson,
    Path(login): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    if !people::delete_person_by_login(&state.pool, &login).await? {
        return Err(AppError::NotFound("Person not found".into()));
    }
    Ok(Json(SuccessResponse { success: true }))
}

/// Reads the multipart `photo` field and stores it, returning the stored
/// name. With no photo field the placeholder name is returned.
pub(crate) async fn save_photo_field(
    state: &AppState,
    mut multipart: Multipart,
) -> AppResult<String> {
    let mut bytes: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("photo") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid photo field: {e}")))?;
            bytes = Some(data.to_vec());
        }
    }
    match bytes {
        Some(data) => Ok(state.photos.save(&data).await?),
        None => Ok(state.photos.placeholder()),
    }
}
