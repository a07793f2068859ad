//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Forbidden is distinct from NotFound: a denied caller learns the resource
/// exists. Conflict carries store-level constraint violations and is never
/// retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error",
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation => {
                    AppError::Conflict(db.to_string())
                }
                _ => AppError::Internal(db.to_string()),
            },
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<adboards_core::auth::AuthError> for AppError {
    fn from(e: adboards_core::auth::AuthError) -> Self {
        match e {
            adboards_core::auth::AuthError::CredentialError => {
                AppError::Unauthorized("Invalid credentials".into())
            }
            adboards_core::auth::AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            adboards_core::auth::AuthError::ValidationError(msg) => AppError::Validation(msg),
            adboards_core::auth::AuthError::DbError(e) => AppError::from(e),
            adboards_core::auth::AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<adboards_core::access::AccessError> for AppError {
    fn from(e: adboards_core::access::AccessError) -> Self {
        match e {
            adboards_core::access::AccessError::Unauthenticated => {
                AppError::Unauthorized("Authentication required".into())
            }
            adboards_core::access::AccessError::Forbidden => {
                AppError::Forbidden("Forbidden".into())
            }
            adboards_core::access::AccessError::MalformedRole => {
                AppError::Validation("Malformed role claim".into())
            }
        }
    }
}

impl From<adboards_core::mail::MailError> for AppError {
    fn from(e: adboards_core::mail::MailError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}
