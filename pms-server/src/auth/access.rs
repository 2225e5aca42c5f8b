//! Hotel Access Resolver
//!
//! Decides whether a caller may act on a hotel-scoped entity. Called
//! before every hotel-scoped mutation and role-gated read; never mutates
//! state.
//!
//! - admin → allow (the admin's own hotel scope is resolved at the
//!   hotel-listing layer, not here)
//! - manager → allow iff an active assignment row exists for
//!   (manager, hotel)
//! - anything else → deny

use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::assignment;
use crate::utils::{AppError, AppResult};
use shared::models::{AssignmentStatus, UserRole};

/// Access decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny(&'static str),
}

/// Pure decision table: role × assignment status → access.
///
/// `assignment` is the caller's assignment row status for the hotel, if
/// any. Only consulted for managers.
pub fn resolve(role: UserRole, assignment: Option<AssignmentStatus>) -> Access {
    match role {
        UserRole::Admin => Access::Allow,
        UserRole::Manager => match assignment {
            Some(AssignmentStatus::Active) => Access::Allow,
            Some(AssignmentStatus::Inactive) | None => Access::Deny("access denied"),
        },
    }
}

/// Authorize a caller against a hotel, fetching the assignment status
/// for managers.
pub async fn authorize(pool: &SqlitePool, user: &CurrentUser, hotel_id: &str) -> AppResult<()> {
    let assignment = match user.role {
        UserRole::Manager => assignment::find_status(pool, hotel_id, &user.id).await?,
        UserRole::Admin => None,
    };

    match resolve(user.role, assignment) {
        Access::Allow => Ok(()),
        Access::Deny(reason) => {
            tracing::warn!(
                target: "security",
                user_id = %user.id,
                hotel_id = %hotel_id,
                "Hotel access denied"
            );
            Err(AppError::access_denied(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_always_allowed() {
        assert_eq!(resolve(UserRole::Admin, None), Access::Allow);
        assert_eq!(
            resolve(UserRole::Admin, Some(AssignmentStatus::Inactive)),
            Access::Allow
        );
    }

    #[test]
    fn manager_with_active_assignment_is_allowed() {
        assert_eq!(
            resolve(UserRole::Manager, Some(AssignmentStatus::Active)),
            Access::Allow
        );
    }

    #[test]
    fn manager_with_inactive_assignment_is_denied() {
        assert_eq!(
            resolve(UserRole::Manager, Some(AssignmentStatus::Inactive)),
            Access::Deny("access denied")
        );
    }

    #[test]
    fn manager_without_assignment_is_denied() {
        assert_eq!(
            resolve(UserRole::Manager, None),
            Access::Deny("access denied")
        );
    }
}
