//! Authentication flows — login, registration, password recovery.

use sqlx::PgPool;
use tracing::info;

use adboards_core::auth::jwt::{TokenConfig, issue_token};
use adboards_core::auth::password::{hash_password, verify_password};
use adboards_core::auth::reset;
use adboards_core::files::PhotoStore;
use adboards_core::mail::Mailer;
use adboards_core::models::Person;
use adboards_core::people::{self, NewPerson};

use crate::error::{AppError, AppResult};
use crate::models::{AuthorizedResponse, RegisterRequest};

/// Authenticate with login + password, returning the person and a fresh
/// identity token. Bad credentials are a bad request, matching the login
/// endpoint's observable contract.
pub async fn login(
    pool: &PgPool,
    token_config: &TokenConfig,
    login: &str,
    password: &str,
) -> AppResult<AuthorizedResponse> {
    let row = people::find_credentials(pool, login).await?;

    // Same generic error for an unknown login and a wrong password.
    let (person, password_hash) = match row {
        None => return Err(AppError::Validation("Invalid login or password".into())),
        Some(r) => r,
    };

    if !verify_password(password, &password_hash)? {
        return Err(AppError::Validation("Invalid login or password".into()));
    }

    let token = issue_token(&person, token_config)?;
    Ok(AuthorizedResponse { person, token })
}

/// Register a new account with the Normal role.
pub async fn register(
    pool: &PgPool,
    photos: &PhotoStore,
    req: RegisterRequest,
) -> AppResult<Person> {
    if req.login.trim().is_empty() {
        return Err(AppError::Validation("Login must not be empty".into()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }

    let password_hash = hash_password(&req.password)?;
    let new = NewPerson {
        login: req.login,
        name: req.name,
        city: req.city,
        birthday: req.birthday,
        phone: req.phone.unwrap_or_default(),
        email: req.email,
        photo_name: photos.placeholder(),
    };

    // A duplicate login surfaces as a store-level conflict.
    let person = people::create_person(pool, &new, &password_hash).await?;
    info!(login = %person.login, id = person.id, "registered person");
    Ok(person)
}

/// Request a password reset for a login.
///
/// Issues a single-use token and mails a reset link. Responds identically
/// whether or not the login exists, so the endpoint cannot be used to probe
/// for accounts.
pub async fn request_password_reset(
    pool: &PgPool,
    mailer: &dyn Mailer,
    public_base_url: &str,
    login: &str,
) -> AppResult<()> {
    let Some(person) = people::find_person_by_login(pool, login).await? else {
        info!(login, "password reset requested for unknown login");
        return Ok(());
    };

    let token = reset::create_reset_token(pool, person.id).await?;
    let link = format!("{public_base_url}/reset-password?token={token}");
    mailer
        .send(
            &person.email,
            "AdBoards password reset",
            &format!("To choose a new password, open: {link}\n\nThe link expires in one hour."),
        )
        .await?;

    info!(id = person.id, "password reset token issued");
    Ok(())
}

/// Complete a password reset: consume the token, store the new hash.
pub async fn reset_password(pool: &PgPool, token: &str, new_password: &str) -> AppResult<()> {
    if new_password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }

    let person_id = match reset::consume_reset_token(pool, token).await? {
        None => {
            return Err(AppError::Validation(
                "Invalid or expired reset token".into(),
            ));
        }
        Some(id) => id,
    };

    let password_hash = hash_password(new_password)?;
    people::set_password(pool, person_id, &password_hash).await?;
    info!(id = person_id, "password reset completed");
    Ok(())
}
