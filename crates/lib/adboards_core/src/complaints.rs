//! Complaint persistence.

use sqlx::PgPool;

use crate::models::Complaint;

/// File a complaint about an ad. The reporter comes from the caller's
/// claims.
pub async fn file_complaint(
    pool: &PgPool,
    ad_id: i32,
    person_id: i32,
    text: &str,
) -> Result<Complaint, sqlx::Error> {
    sqlx::query_as::<_, Complaint>(
        "INSERT INTO complaints (ad_id, person_id, text) VALUES ($1, $2, $3) \
         RETURNING id, ad_id, person_id, text, created",
    )
    .bind(ad_id)
    .bind(person_id)
    .bind(text)
    .fetch_one(pool)
    .await
}

/// List the complaints filed against an ad, oldest first.
pub async fn list_complaints_for_ad(
    pool: &PgPool,
    ad_id: i32,
) -> Result<Vec<Complaint>, sqlx::Error> {
    sqlx::query_as::<_, Complaint>(
        "SELECT id, ad_id, person_id, text, created FROM complaints \
         WHERE ad_id = $1 ORDER BY created",
    )
    .bind(ad_id)
    .fetch_all(pool)
    .await
}
