//! Custom extractors for API handlers.
//!
//! Each route's authorization policy is declared by the extractor its
//! handler takes: [`CurrentPerson`] for authenticated-user routes,
//! [`AdminPerson`] for admin-only routes, [`MaybePerson`] for anonymous
//! routes that behave slightly differently for signed-in callers. The
//! extractors read the verified claims the auth middleware placed in
//! request extensions and run them through the policy engine.

use axum::{extract::FromRequestParts, http::request::Parts};

use adboards_core::access::{Policy, authorize};
use adboards_core::models::Claims;

use crate::error::AppError;

/// Extractor for authenticated requests. Rejects with 401 when no valid
/// claims accompany the request.
pub struct CurrentPerson(pub Claims);

impl<S> FromRequestParts<S> for CurrentPerson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<Claims>().cloned();
        authorize(claims.as_ref(), Policy::AuthenticatedUser)?;
        claims
            .map(CurrentPerson)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
    }
}

/// Extractor for admin-only requests. 401 without claims, 403 when the role
/// claim is not the admin role.
pub struct AdminPerson(pub Claims);

impl<S> FromRequestParts<S> for AdminPerson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<Claims>().cloned();
        authorize(claims.as_ref(), Policy::AdminOnly)?;
        claims
            .map(AdminPerson)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
    }
}

/// Extractor for anonymous routes that personalize when claims are present
/// (e.g. the public ad lookup marking favorites). Never rejects.
pub struct MaybePerson(pub Option<Claims>);

impl<S> FromRequestParts<S> for MaybePerson
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybePerson(parts.extensions.get::<Claims>().cloned()))
    }
}
