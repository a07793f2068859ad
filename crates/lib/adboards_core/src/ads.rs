//! Ad persistence.

use sqlx::PgPool;

use crate::models::Ad;

const AD_COLUMNS: &str =
    "id, price, name, description, city, posted, category_id, person_id, ad_type_id, photo_name";

/// Input for creating a listing. The owner comes from the caller's claims,
/// never from here.
#[derive(Debug, Clone)]
pub struct NewAd {
    pub price: i32,
    pub name: String,
    pub description: String,
    pub city: String,
    pub category_id: i32,
    pub ad_type_id: i32,
}

/// Partial listing update. Only present fields are written; the owner is
/// never touched.
#[derive(Debug, Clone, Default)]
pub struct AdPatch {
    pub price: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub category_id: Option<i32>,
    pub ad_type_id: Option<i32>,
}

/// Fetch an ad by id.
pub async fn find_ad(pool: &PgPool, id: i32) -> Result<Option<Ad>, sqlx::Error> {
    sqlx::query_as::<_, Ad>(&format!("SELECT {AD_COLUMNS} FROM ads WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List all ads, newest first.
pub async fn list_ads(pool: &PgPool) -> Result<Vec<Ad>, sqlx::Error> {
    sqlx::query_as::<_, Ad>(&format!(
        "SELECT {AD_COLUMNS} FROM ads ORDER BY posted DESC, id DESC"
    ))
    .fetch_all(pool)
    .await
}

/// List the ads owned by a person.
pub async fn list_ads_by_person(pool: &PgPool, person_id: i32) -> Result<Vec<Ad>, sqlx::Error> {
    sqlx::query_as::<_, Ad>(&format!(
        "SELECT {AD_COLUMNS} FROM ads WHERE person_id = $1 ORDER BY posted DESC, id DESC"
    ))
    .bind(person_id)
    .fetch_all(pool)
    .await
}

/// List the ads a person has marked favorite.
pub async fn list_favorite_ads(pool: &PgPool, person_id: i32) -> Result<Vec<Ad>, sqlx::Error> {
    sqlx::query_as::<_, Ad>(&format!(
        "SELECT a.id, a.price, a.name, a.description, a.city, a.posted, \
                a.category_id, a.person_id, a.ad_type_id, a.photo_name \
         FROM ads a \
         JOIN favorites f ON f.ad_id = a.id \
         WHERE f.person_id = $1 \
         ORDER BY a.posted DESC, a.id DESC"
    ))
    .bind(person_id)
    .fetch_all(pool)
    .await
}

/// Create an ad owned by `person_id`, posted today.
pub async fn create_ad(
    pool: &PgPool,
    new: &NewAd,
    person_id: i32,
    photo_name: &str,
) -> Result<Ad, sqlx::Error> {
    sqlx::query_as::<_, Ad>(&format!(
        "INSERT INTO ads (price, name, description, city, category_id, person_id, ad_type_id, photo_name) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING {AD_COLUMNS}"
    ))
    .bind(new.price)
    .bind(&new.name)
    .bind(&new.description)
    .bind(&new.city)
    .bind(new.category_id)
    .bind(person_id)
    .bind(new.ad_type_id)
    .bind(photo_name)
    .fetch_one(pool)
    .await
}

/// Apply a partial update to an ad.
pub async fn update_ad(pool: &PgPool, id: i32, patch: &AdPatch) -> Result<Ad, sqlx::Error> {
    sqlx::query_as::<_, Ad>(&format!(
        "UPDATE ads SET \
         price = COALESCE($2, price), \
         name = COALESCE($3, name), \
         description = COALESCE($4, description), \
         city = COALESCE($5, city), \
         category_id = COALESCE($6, category_id), \
         ad_type_id = COALESCE($7, ad_type_id) \
         WHERE id = $1 \
         RETURNING {AD_COLUMNS}"
    ))
    .bind(id)
    .bind(patch.price)
    .bind(patch.name.as_deref())
    .bind(patch.description.as_deref())
    .bind(patch.city.as_deref())
    .bind(patch.category_id)
    .bind(patch.ad_type_id)
    .fetch_one(pool)
    .await
}

/// Replace an ad's stored photo name.
pub async fn set_ad_photo(pool: &PgPool, id: i32, photo_name: &str) -> Result<Ad, sqlx::Error> {
    sqlx::query_as::<_, Ad>(&format!(
        "UPDATE ads SET photo_name = $2 WHERE id = $1 RETURNING {AD_COLUMNS}"
    ))
    .bind(id)
    .bind(photo_name)
    .fetch_one(pool)
    .await
}

/// Delete an ad. Returns whether a row was removed.
pub async fn delete_ad(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM ads WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
