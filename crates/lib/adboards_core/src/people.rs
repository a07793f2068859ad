//! Person persistence.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::Person;

const PERSON_COLUMNS: &str =
    "id, login, name, city, birthday, phone, email, role, photo_name";

/// Input for registration.
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub login: String,
    pub name: String,
    pub city: String,
    pub birthday: Option<NaiveDate>,
    pub phone: String,
    pub email: String,
    pub photo_name: String,
}

/// Partial profile update. `name` and `city` are always written; the rest
/// only when present.
#[derive(Debug, Clone)]
pub struct PersonPatch {
    pub name: String,
    pub city: String,
    pub birthday: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    person: Person,
    password_hash: String,
}

/// Fetch a person and their password hash by login.
pub async fn find_credentials(
    pool: &PgPool,
    login: &str,
) -> Result<Option<(Person, String)>, sqlx::Error> {
    let row = sqlx::query_as::<_, CredentialsRow>(&format!(
        "SELECT {PERSON_COLUMNS}, password_hash FROM people WHERE login = $1"
    ))
    .bind(login)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|r| (r.person, r.password_hash)))
}

/// Fetch a person by id.
pub async fn find_person(pool: &PgPool, id: i32) -> Result<Option<Person>, sqlx::Error> {
    sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Fetch a person by login.
pub async fn find_person_by_login(
    pool: &PgPool,
    login: &str,
) -> Result<Option<Person>, sqlx::Error> {
    sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people WHERE login = $1"
    ))
    .bind(login)
    .fetch_optional(pool)
    .await
}

/// Create a person with the Normal role.
pub async fn create_person(
    pool: &PgPool,
    new: &NewPerson,
    password_hash: &str,
) -> Result<Person, sqlx::Error> {
    sqlx::query_as::<_, Person>(&format!(
        "INSERT INTO people (login, password_hash, name, city, birthday, phone, email, photo_name) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING {PERSON_COLUMNS}"
    ))
    .bind(&new.login)
    .bind(password_hash)
    .bind(&new.name)
    .bind(&new.city)
    .bind(new.birthday)
    .bind(&new.phone)
    .bind(&new.email)
    .bind(&new.photo_name)
    .fetch_one(pool)
    .await
}

/// Apply a profile patch to a person's own record.
pub async fn update_person(
    pool: &PgPool,
    id: i32,
    patch: &PersonPatch,
) -> Result<Option<Person>, sqlx::Error> {
    sqlx::query_as::<_, Person>(&format!(
        "UPDATE people SET name = $2, city = $3, \
         birthday = COALESCE($4, birthday), \
         phone = COALESCE($5, phone), \
         email = COALESCE($6, email) \
         WHERE id = $1 \
         RETURNING {PERSON_COLUMNS}"
    ))
    .bind(id)
    .bind(&patch.name)
    .bind(&patch.city)
    .bind(patch.birthday)
    .bind(patch.phone.as_deref())
    .bind(patch.email.as_deref())
    .fetch_optional(pool)
    .await
}

/// Replace a person's stored photo name.
pub async fn set_person_photo(
    pool: &PgPool,
    id: i32,
    photo_name: &str,
) -> Result<Option<Person>, sqlx::Error> {
    sqlx::query_as::<_, Person>(&format!(
        "UPDATE people SET photo_name = $2 WHERE id = $1 RETURNING {PERSON_COLUMNS}"
    ))
    .bind(id)
    .bind(photo_name)
    .fetch_optional(pool)
    .await
}

/// Replace a person's password hash.
pub async fn set_password(pool: &PgPool, id: i32, password_hash: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE people SET password_hash = $2 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a person by login. Owned ads and favorites cascade at the store
/// level. Returns whether a row was removed.
pub async fn delete_person_by_login(pool: &PgPool, login: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM people WHERE login = $1")
        .bind(login)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// List all people.
pub async fn list_people(pool: &PgPool) -> Result<Vec<Person>, sqlx::Error> {
    sqlx::query_as::<_, Person>(&format!("SELECT {PERSON_COLUMNS} FROM people ORDER BY id"))
        .fetch_all(pool)
        .await
}

/// Count registered people.
pub async fn count_people(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM people")
        .fetch_one(pool)
        .await
}
