//! Current session routes

use serde::Serialize;

use crate::common::auth::{Permissions, UserRole};
use crate::domains::user::UserData;
use crate::domains::website::data::MetaData;
use crate::server::error::{ApiResponse, ApiResult};
use crate::server::middleware::MaybeUser;

/// Permission set of the caller, with the role it was derived from
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsData {
    pub role: Option<UserRole>,
    #[serde(flatten)]
    pub permissions: Permissions,
}

/// GET /api/me - the signed-in user, or null
pub async fn current_user(MaybeUser(user): MaybeUser) -> ApiResult<Option<UserData>> {
    Ok(ApiResponse::ok(user.map(|u| UserData::from(u.user))))
}

/// GET /api/me/permissions
pub async fn current_permissions(MaybeUser(user): MaybeUser) -> ApiResult<PermissionsData> {
    let role = user.map(|u| u.role());
    Ok(ApiResponse::ok(PermissionsData {
        role,
        permissions: Permissions::for_role(role),
    }))
}

/// GET /api/meta - closed enum domains with labels
pub async fn meta() -> ApiResult<MetaData> {
    Ok(ApiResponse::ok(MetaData::current()))
}
