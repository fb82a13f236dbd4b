use thiserror::Error;

use super::UserRole;

/// Authorization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Insufficient role: {required} required, have {actual}")]
    InsufficientRole { required: UserRole, actual: UserRole },

    #[error("A {actor} cannot manage a {target}")]
    CannotManageUser { actor: UserRole, target: UserRole },

    #[error("Admins cannot change or delete their own account here")]
    SelfModification,
}

impl AuthError {
    /// Whether the caller is known but lacks permission (403) as opposed to
    /// not being signed in at all (401).
    pub fn is_forbidden(&self) -> bool {
        !matches!(self, AuthError::AuthenticationRequired)
    }
}
