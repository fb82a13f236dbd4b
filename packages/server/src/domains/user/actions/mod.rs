//! User actions
//!
//! Session resolution runs on every authenticated request. The admin
//! actions check `ManageUsers` themselves, whatever route called them.

use anyhow::Result;
use tracing::{debug, info};

use crate::common::auth::{Actor, Capability, UserRole};
use crate::common::{Page, PageArgs, UserId};
use crate::domains::auth::SessionIdentity;
use crate::domains::user::data::{UserData, UserStatsData};
use crate::domains::user::models::User;
use crate::kernel::ServerDeps;

/// Default page size of the admin user table
pub const ADMIN_USERS_PAGE_SIZE: i64 = 10;

/// Load the user behind a verified session, creating it on first sight.
pub async fn resolve_session_user(identity: &SessionIdentity, deps: &ServerDeps) -> Result<User> {
    if let Some(user) = User::find_by_id(identity.user_id, &deps.db_pool).await? {
        return Ok(user);
    }

    info!(user_id = %identity.user_id, email = %identity.email, "Creating user on first sign-in");
    User::find_or_create_from_claims(identity, &deps.db_pool).await
}

/// Paginated admin user table
pub async fn list_users(
    actor: Actor,
    search: Option<String>,
    page: Option<i64>,
    limit: Option<i64>,
    deps: &ServerDeps,
) -> Result<Page<UserData>> {
    actor.can(Capability::ManageUsers).check()?;

    let args = PageArgs::from_page(page, limit, ADMIN_USERS_PAGE_SIZE).validate();
    let search = crate::common::search::normalize_term(search.as_deref());
    debug!(search = ?search, page = args.page(), "Listing users");

    let (users, total) = User::find_admin_list(search.as_deref(), &args, &deps.db_pool).await?;
    Ok(Page::new(users, total, &args).map(UserData::from))
}

/// Total users and counts per role
pub async fn user_stats(actor: Actor, deps: &ServerDeps) -> Result<UserStatsData> {
    actor.can(Capability::ManageUsers).check()?;
    Ok(User::stats(&deps.db_pool).await?.into())
}

/// Change a user's role.
///
/// Returns `None` when the target does not exist.
pub async fn update_user_role(
    actor: Actor,
    target_id: UserId,
    role: UserRole,
    deps: &ServerDeps,
) -> Result<Option<UserData>> {
    actor.can(Capability::ManageUsers).check()?;

    let Some(target) = User::find_by_id(target_id, &deps.db_pool).await? else {
        return Ok(None);
    };
    actor.check_manage(target.id, target.role)?;

    info!(
        actor_id = %actor.id(),
        user_id = %target_id,
        from = %target.role,
        to = %role,
        "Updating user role"
    );
    let updated = User::update_role(target_id, role, &deps.db_pool).await?;
    Ok(updated.map(UserData::from))
}

/// Delete a user and everything they own.
///
/// Returns whether the user existed.
pub async fn delete_user(actor: Actor, target_id: UserId, deps: &ServerDeps) -> Result<bool> {
    actor.can(Capability::ManageUsers).check()?;

    let Some(target) = User::find_by_id(target_id, &deps.db_pool).await? else {
        return Ok(false);
    };
    actor.check_manage(target.id, target.role)?;

    info!(actor_id = %actor.id(), user_id = %target_id, "Deleting user");
    User::delete(target_id, &deps.db_pool).await
}
