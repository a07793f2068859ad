//! Domain models.
//!
//! These are internal domain models; API request/response shapes live in
//! `adboards_api` and carry their own serde attributes.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Account role. Embedded in the token at issuance and not re-derived from
/// the database during the token's lifetime — a role change takes effect on
/// the next login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "person_role")]
pub enum Role {
    Normal,
    Admin,
}

impl Role {
    /// The string form carried in the `rightId` claim and stored in the DB.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Normal => "Normal",
            Role::Admin => "Admin",
        }
    }

    /// Parses a role from its claim string. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Normal" => Some(Role::Normal),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account. The password hash is never part of this struct;
/// credential lookups return it separately.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Person {
    pub id: i32,
    pub login: String,
    pub name: String,
    pub city: String,
    pub birthday: Option<NaiveDate>,
    pub phone: String,
    pub email: String,
    pub role: Role,
    pub photo_name: String,
}

/// A classified listing. `person_id` is the owning account and is immutable
/// after creation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ad {
    pub id: i32,
    pub price: i32,
    pub name: String,
    pub description: String,
    pub city: String,
    pub posted: NaiveDate,
    pub category_id: i32,
    pub person_id: i32,
    pub ad_type_id: i32,
    pub photo_name: String,
}

/// A (person, ad) favorite pair. At most one row per pair.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Favorite {
    pub person_id: i32,
    pub ad_id: i32,
}

/// A complaint filed against a listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Complaint {
    pub id: i32,
    pub ad_id: i32,
    pub person_id: i32,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// JWT claims embedded in identity tokens.
///
/// The acting person's id always comes from here, never from a request body.
/// `rightId` carries the role as a string; role-gated operations parse it and
/// treat junk as a bad request rather than a forbidden one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — person id (standard JWT `sub` claim).
    pub sub: String,
    /// Person id.
    pub id: i32,
    /// Account email.
    pub email: String,
    /// Account login.
    pub login: String,
    /// Role claim.
    #[serde(rename = "rightId")]
    pub right_id: String,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Parses the role claim. `None` when the claim carries junk.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.right_id)
    }

    /// String-compares the role claim against the admin role, mirroring how
    /// the admin policy is declared. No parse failure path here.
    pub fn is_admin(&self) -> bool {
        self.right_id == Role::Admin.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_claim_string() {
        assert_eq!(Role::parse(Role::Admin.as_str()), Some(Role::Admin));
        assert_eq!(Role::parse(Role::Normal.as_str()), Some(Role::Normal));
        assert_eq!(Role::parse("Superuser"), None);
        assert_eq!(Role::parse("admin"), None);
    }
}
