//! Authorization policies and the resource-ownership gate.
//!
//! Every mutating operation passes two layers: the [`Policy`] declared for
//! the route, then, for resource-scoped writes, an ownership comparison
//! between the resource's owner and the verified caller claims. Both layers
//! are pure functions of the claims and the resource row fetched for the
//! request, so a denied caller leaves the row untouched.

use thiserror::Error;

use crate::models::Claims;

/// Authorization requirement declared per operation at router construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// No claims needed (login, registration, public listing reads).
    Anonymous,
    /// Valid claims required. The default for every operation.
    AuthenticatedUser,
    /// Valid claims carrying the admin role required.
    AdminOnly,
}

/// A denied access decision.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    /// The role claim on a role-gated operation did not parse. Surfaced as
    /// a bad request, not as forbidden.
    #[error("malformed role claim")]
    MalformedRole,
}

/// Evaluates whether an identity may invoke an operation under `policy`.
pub fn authorize(claims: Option<&Claims>, policy: Policy) -> Result<(), AccessError> {
    match policy {
        Policy::Anonymous => Ok(()),
        Policy::AuthenticatedUser => claims.map(|_| ()).ok_or(AccessError::Unauthenticated),
        Policy::AdminOnly => {
            let claims = claims.ok_or(AccessError::Unauthenticated)?;
            if claims.is_admin() {
                Ok(())
            } else {
                Err(AccessError::Forbidden)
            }
        }
    }
}

/// Mutating ad operations subject to the ownership gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdAction {
    Update,
    UpdatePhoto,
    Delete,
}

impl AdAction {
    /// Whether the admin role bypasses ownership for this operation.
    ///
    /// Deletion is the only override: an admin may remove any listing but
    /// may not edit one they do not own.
    pub fn admin_override(self) -> bool {
        matches!(self, AdAction::Delete)
    }
}

/// Checks whether `claims` may perform `action` on an ad owned by
/// `owner_id`.
///
/// Operations with an admin override parse the role claim; a claim that
/// carries junk yields [`AccessError::MalformedRole`]. Operations without
/// the override never look at the role at all.
pub fn check_ad_owner(owner_id: i32, claims: &Claims, action: AdAction) -> Result<(), AccessError> {
    if action.admin_override() {
        let role = claims.role().ok_or(AccessError::MalformedRole)?;
        if role == crate::models::Role::Admin {
            return Ok(());
        }
    }
    if claims.id == owner_id {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}

/// Checks whether `claims` may touch a favorite owned by `owner_id`.
/// Favorites have no admin override.
pub fn check_favorite_owner(owner_id: i32, claims: &Claims) -> Result<(), AccessError> {
    if claims.id == owner_id {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn claims(id: i32, right_id: &str) -> Claims {
        Claims {
            sub: id.to_string(),
            id,
            email: "a@example.com".into(),
            login: "a".into(),
            right_id: right_id.into(),
            iss: "adboards".into(),
            aud: "adboards-clients".into(),
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn anonymous_policy_ignores_claims() {
        assert_eq!(authorize(None, Policy::Anonymous), Ok(()));
        assert_eq!(
            authorize(Some(&claims(1, "Normal")), Policy::Anonymous),
            Ok(())
        );
    }

    #[test]
    fn authenticated_policy_requires_claims() {
        assert_eq!(
            authorize(None, Policy::AuthenticatedUser),
            Err(AccessError::Unauthenticated)
        );
        assert_eq!(
            authorize(Some(&claims(1, "Normal")), Policy::AuthenticatedUser),
            Ok(())
        );
    }

    #[test]
    fn admin_policy_requires_admin_role_claim() {
        assert_eq!(
            authorize(None, Policy::AdminOnly),
            Err(AccessError::Unauthenticated)
        );
        assert_eq!(
            authorize(Some(&claims(1, "Normal")), Policy::AdminOnly),
            Err(AccessError::Forbidden)
        );
        assert_eq!(authorize(Some(&claims(1, "Admin")), Policy::AdminOnly), Ok(()));
        // The policy check is string equality, so junk is just not-admin.
        assert_eq!(
            authorize(Some(&claims(1, "garbage")), Policy::AdminOnly),
            Err(AccessError::Forbidden)
        );
    }

    #[test]
    fn owner_may_perform_every_ad_action() {
        let c = claims(7, Role::Normal.as_str());
        for action in [AdAction::Update, AdAction::UpdatePhoto, AdAction::Delete] {
            assert_eq!(check_ad_owner(7, &c, action), Ok(()));
        }
    }

    #[test]
    fn non_owner_is_forbidden_without_admin() {
        let c = claims(7, Role::Normal.as_str());
        for action in [AdAction::Update, AdAction::UpdatePhoto, AdAction::Delete] {
            assert_eq!(check_ad_owner(8, &c, action), Err(AccessError::Forbidden));
        }
    }

    #[test]
    fn admin_override_applies_to_delete_only() {
        let admin = claims(7, Role::Admin.as_str());
        assert_eq!(check_ad_owner(8, &admin, AdAction::Delete), Ok(()));
        assert_eq!(
            check_ad_owner(8, &admin, AdAction::Update),
            Err(AccessError::Forbidden)
        );
        assert_eq!(
            check_ad_owner(8, &admin, AdAction::UpdatePhoto),
            Err(AccessError::Forbidden)
        );
    }

    #[test]
    fn malformed_role_claim_is_bad_request_on_delete() {
        let junk = claims(7, "NotARole");
        assert_eq!(
            check_ad_owner(8, &junk, AdAction::Delete),
            Err(AccessError::MalformedRole)
        );
        // Even the owner hits the malformed-role outcome on delete: the
        // role-gated path parses the claim before ownership.
        assert_eq!(
            check_ad_owner(7, &junk, AdAction::Delete),
            Err(AccessError::MalformedRole)
        );
        // Update never parses the role, so junk there is invisible.
        assert_eq!(check_ad_owner(7, &junk, AdAction::Update), Ok(()));
    }

    #[test]
    fn favorites_have_no_admin_override() {
        let admin = claims(7, Role::Admin.as_str());
        assert_eq!(check_favorite_owner(7, &admin), Ok(()));
        assert_eq!(check_favorite_owner(8, &admin), Err(AccessError::Forbidden));
    }
}
