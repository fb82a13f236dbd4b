use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::auth::UserRole;
use crate::common::UserId;
use crate::domains::user::models::{RoleCounts, User};

/// User API representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub image: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            email_verified: user.email_verified,
            image: user.image,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// The public face of a user attached to websites and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub image: Option<String>,
}

/// User counts for the admin users page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsData {
    pub total_users: i64,
    pub by_role: RoleBreakdown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleBreakdown {
    pub user: i64,
    pub moderator: i64,
    pub admin: i64,
}

impl From<RoleCounts> for UserStatsData {
    fn from(counts: RoleCounts) -> Self {
        Self {
            total_users: counts.total,
            by_role: RoleBreakdown {
                user: counts.users,
                moderator: counts.moderators,
                admin: counts.admins,
            },
        }
    }
}
