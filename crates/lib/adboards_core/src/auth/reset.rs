//! Single-use password-reset tokens.
//!
//! A reset token is a random 64-character string handed to the account's
//! email address; only its SHA-256 hash is stored. Consuming a token marks
//! it used in the same statement that looks it up, so it cannot be replayed.

use chrono::{Duration, Utc};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use super::AuthError;

/// Reset token lifetime: 1 hour.
const RESET_TOKEN_EXPIRY_MINS: i64 = 60;

/// Generate a cryptographically random reset token (64 alphanumeric chars).
fn generate_reset_token() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// SHA-256 hash a reset token for storage.
fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Create a reset token for a person, returning the plaintext to be mailed.
pub async fn create_reset_token(pool: &PgPool, person_id: i32) -> Result<String, AuthError> {
    let token = generate_reset_token();
    let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_EXPIRY_MINS);
    sqlx::query(
        "INSERT INTO password_reset_tokens (person_id, token_hash, expires_at) \
         VALUES ($1, $2, $3)",
    )
    .bind(person_id)
    .bind(hash_reset_token(&token))
    .bind(expires_at)
    .execute(pool)
    .await?;
    Ok(token)
}

/// Consume a reset token: marks it used and returns the owning person's id.
///
/// Returns `None` when the token is unknown, expired, or already used.
pub async fn consume_reset_token(pool: &PgPool, token: &str) -> Result<Option<i32>, AuthError> {
    let person_id = sqlx::query_scalar::<_, i32>(
        "UPDATE password_reset_tokens SET used_at = now() \
         WHERE token_hash = $1 AND used_at IS NULL AND expires_at > now() \
         RETURNING person_id",
    )
    .bind(hash_reset_token(token))
    .fetch_optional(pool)
    .await?;
    Ok(person_id)
}
