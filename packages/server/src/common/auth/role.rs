use anyhow::Result;
use serde::{Deserialize, Serialize};

/// User role. Ordered: `User < Moderator < Admin`, a higher role satisfies
/// every requirement of a lower one.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Moderator,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::User, UserRole::Moderator, UserRole::Admin];

    /// Position in the role hierarchy (user=1, moderator=2, admin=3).
    pub fn level(self) -> u8 {
        match self {
            UserRole::User => 1,
            UserRole::Moderator => 2,
            UserRole::Admin => 3,
        }
    }

    /// True if this role meets `required`.
    pub fn satisfies(self, required: UserRole) -> bool {
        self.level() >= required.level()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Moderator => "moderator",
            UserRole::Admin => "admin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserRole::User => "User",
            UserRole::Moderator => "Moderator",
            UserRole::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(UserRole::User),
            "moderator" => Ok(UserRole::Moderator),
            "admin" => Ok(UserRole::Admin),
            _ => Err(anyhow::anyhow!("Invalid user role: {}", s)),
        }
    }
}
