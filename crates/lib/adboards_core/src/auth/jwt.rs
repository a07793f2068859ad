//! Identity-token issuance and verification.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::info;

use super::AuthError;
use crate::models::{Claims, Person};

/// Token lifetime: 7 days. Tokens are not revocable server-side; a role
/// change takes effect on the next login.
const TOKEN_EXPIRY_DAYS: i64 = 7;

/// Signing configuration shared by issuance and verification.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC-SHA-512 shared secret.
    pub secret: String,
    /// Expected `iss` claim.
    pub issuer: String,
    /// Expected `aud` claim.
    pub audience: String,
}

/// Issue a signed identity token (HS512, 7 day expiry) for an authenticated
/// person.
pub fn issue_token(person: &Person, config: &TokenConfig) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: person.id.to_string(),
        id: person.id,
        email: person.email.clone(),
        login: person.login.clone(),
        right_id: person.role.as_str().to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::days(TOKEN_EXPIRY_DAYS)).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify an identity token, returning the claims on success.
///
/// Checks signature, issuer, audience, and expiry. Any failure yields `None`
/// and the request is treated as anonymous.
pub fn verify_token(token: &str, config: &TokenConfig) -> Option<Claims> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS512);
    validation.validate_exp = true;
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);
    decode::<Claims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

/// Resolve the token signing secret: env var `JWT_SECRET` → persisted file.
///
/// A missing secret is generated once and persisted, so a restart keeps
/// outstanding tokens valid.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new JWT secret");
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("adboards")
        .join("jwt-secret")
}
