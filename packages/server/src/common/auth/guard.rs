//! Component-level role gate.
//!
//! The edge gates (page redirects, admin API 401/403) reject whole requests.
//! `RoleGuard` answers the finer question a page or widget asks before it
//! renders an affordance, and reports why it was refused so the caller can
//! pick a fallback.

use serde::Serialize;

use super::{Capability, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum GuardOutcome {
    Granted,
    NotSignedIn,
    InsufficientRole { required: UserRole, actual: UserRole },
}

impl GuardOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, GuardOutcome::Granted)
    }
}

pub struct RoleGuard;

impl RoleGuard {
    pub fn evaluate(role: Option<UserRole>, required: UserRole) -> GuardOutcome {
        match role {
            None => GuardOutcome::NotSignedIn,
            Some(actual) if actual.satisfies(required) => GuardOutcome::Granted,
            Some(actual) => GuardOutcome::InsufficientRole { required, actual },
        }
    }
}

/// Which capabilities a caller holds, for driving UI affordances.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_submit_website: bool,
    pub can_moderate_websites: bool,
    pub can_manage_users: bool,
    pub can_access_admin: bool,
    pub can_delete_websites: bool,
    pub can_edit_any_website: bool,
    pub can_view_analytics: bool,
}

impl Permissions {
    pub fn for_role(role: Option<UserRole>) -> Self {
        let has = |capability: Capability| {
            RoleGuard::evaluate(role, capability.required_role()).is_granted()
        };
        Permissions {
            can_submit_website: has(Capability::SubmitWebsite),
            can_moderate_websites: has(Capability::ModerateWebsites),
            can_manage_users: has(Capability::ManageUsers),
            can_access_admin: has(Capability::AccessAdmin),
            can_delete_websites: has(Capability::DeleteWebsites),
            can_edit_any_website: has(Capability::EditAnyWebsite),
            can_view_analytics: has(Capability::ViewAnalytics),
        }
    }
}
