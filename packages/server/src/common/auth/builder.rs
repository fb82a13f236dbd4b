use super::{AuthError, Capability, UserRole};
use crate::common::entity_ids::UserId;

/// Entry point for authorization checks
///
/// Usage:
/// ```
/// use showcase_core::common::{Actor, Capability, UserId, UserRole};
///
/// let actor = Actor::new(UserId::new(), UserRole::Moderator);
/// assert!(actor.can(Capability::ModerateWebsites).check().is_ok());
/// assert!(actor.can(Capability::ManageUsers).check().is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    actor_id: UserId,
    role: UserRole,
}

impl Actor {
    /// `role` is the role stored for the user, loaded per request.
    pub fn new(actor_id: UserId, role: UserRole) -> Self {
        Self { actor_id, role }
    }

    pub fn id(&self) -> UserId {
        self.actor_id
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }

    /// Whether this actor may manage a user holding `target`.
    ///
    /// Admins manage everyone, moderators only plain users, users nobody.
    pub fn can_manage(&self, target: UserRole) -> bool {
        match self.role {
            UserRole::Admin => true,
            UserRole::Moderator => target == UserRole::User,
            UserRole::User => false,
        }
    }

    /// Like [`Actor::can_manage`] but as a check.
    pub fn check_manage(&self, target_id: UserId, target: UserRole) -> Result<(), AuthError> {
        if target_id == self.actor_id {
            return Err(AuthError::SelfModification);
        }
        if !self.can_manage(target) {
            return Err(AuthError::CannotManageUser {
                actor: self.role,
                target,
            });
        }
        Ok(())
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor: Actor,
    capability: Capability,
}

impl CapabilityBuilder {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        let required = self.capability.required_role();
        if self.actor.role.satisfies(required) {
            Ok(())
        } else {
            Err(AuthError::InsufficientRole {
                required,
                actual: self.actor.role,
            })
        }
    }
}
