//! Authentication request handlers.

use axum::Json;
use axum::extract::State;

use adboards_core::models::Person;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{
    AuthorizedResponse, LoginRequest, RecoverRequest, RegisterRequest, ResetPasswordRequest,
    SuccessResponse,
};
use crate::services::auth;

/// `POST /api/auth/login` — authenticate with login + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthorizedResponse>> {
    let resp = auth::login(&state.pool, &state.config.token, &body.login, &body.password).await?;
    Ok(Json(resp))
}

/// `POST /api/auth/register` — create a new account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Json<Person>> {
    let person = auth::register(&state.pool, &state.photos, body).await?;
    Ok(Json(person))
}

/// `POST /api/auth/recover` — request a password-reset link by login.
pub async fn recover_handler(
    State(state): State<AppState>,
    Json(body): Json<RecoverRequest>,
) -> AppResult<Json<SuccessResponse>> {
    auth::request_password_reset(
        &state.pool,
        state.mailer.as_ref(),
        &state.config.public_base_url,
        &body.login,
    )
    .await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// `POST /api/auth/reset-password` — set a new password with a reset token.
pub async fn reset_password_handler(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> AppResult<Json<SuccessResponse>> {
    auth::reset_password(&state.pool, &body.token, &body.password).await?;
    Ok(Json(SuccessResponse { success: true }))
}
