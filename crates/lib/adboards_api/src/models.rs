//! Request and response shapes for the HTTP surface.
//!
//! Domain models (`Person`, `Ad`, ...) serialize directly; the types here
//! cover inputs and the few composite responses.

use adboards_core::models::{Ad, Person};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Generic success body.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// `POST /api/auth/login` body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// `POST /api/auth/register` body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
    pub name: String,
    pub city: String,
    pub birthday: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: String,
}

/// Successful login: the person plus their identity token.
#[derive(Debug, Serialize)]
pub struct AuthorizedResponse {
    pub person: Person,
    pub token: String,
}

/// `POST /api/auth/recover` body.
#[derive(Debug, Deserialize)]
pub struct RecoverRequest {
    pub login: String,
}

/// `POST /api/auth/reset-password` body.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// `PUT /api/me` body. `name` and `city` are required; the rest optional.
#[derive(Debug, Deserialize)]
pub struct UpdatePersonRequest {
    pub name: String,
    pub city: String,
    pub birthday: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// `POST /api/ads` body.
#[derive(Debug, Deserialize)]
pub struct AddAdRequest {
    pub price: i32,
    pub name: String,
    pub description: String,
    pub city: String,
    pub category_id: i32,
    pub ad_type_id: i32,
}

/// `PUT /api/ads/{id}` body. All fields optional; absent fields keep their
/// stored value.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateAdRequest {
    pub price: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub category_id: Option<i32>,
    pub ad_type_id: Option<i32>,
}

/// Single-ad response: the ad plus whether the caller has it favorited.
#[derive(Debug, Serialize)]
pub struct AdDetails {
    #[serde(flatten)]
    pub ad: Ad,
    pub is_favorite: bool,
}

/// `POST /api/ads/{id}/complaints` body.
#[derive(Debug, Deserialize)]
pub struct ComplaintRequest {
    pub text: String,
}
