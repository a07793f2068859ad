//! Favorite persistence.
//!
//! A favorite is a (person, ad) pair with a uniqueness constraint; only the
//! owning person ever creates or removes their pairs.

use sqlx::PgPool;

/// Whether the pair exists.
pub async fn is_favorite(pool: &PgPool, person_id: i32, ad_id: i32) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM favorites WHERE person_id = $1 AND ad_id = $2)",
    )
    .bind(person_id)
    .bind(ad_id)
    .fetch_one(pool)
    .await
}

/// Insert the pair. The primary key rejects duplicates at the store level;
/// callers pre-check with [`is_favorite`] to surface a bad request instead.
pub async fn add_favorite(pool: &PgPool, person_id: i32, ad_id: i32) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO favorites (person_id, ad_id) VALUES ($1, $2)")
        .bind(person_id)
        .bind(ad_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove the caller's own pair. Returns whether a row was removed.
pub async fn remove_favorite(
    pool: &PgPool,
    person_id: i32,
    ad_id: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM favorites WHERE person_id = $1 AND ad_id = $2")
        .bind(person_id)
        .bind(ad_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
