/// Authorization for the gallery
///
/// Roles form a hierarchy (user < moderator < admin) and every capability
/// names the lowest role that holds it:
///
/// ```rust,ignore
/// use crate::common::auth::{Actor, Capability};
///
/// Actor::new(user.id, user.role)
///     .can(Capability::ModerateWebsites)
///     .check()?;
/// ```
///
/// Checks run in the action layer. HTTP middleware only gates whole
/// namespaces.

mod builder;
mod capability;
mod errors;
mod guard;
mod role;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::Capability;
pub use errors::AuthError;
pub use guard::{GuardOutcome, Permissions, RoleGuard};
pub use role::UserRole;
