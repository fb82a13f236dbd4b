//! Admin API routes
//!
//! Mounted under `/api/admin`, behind the moderator gate. Admin-only
//! operations are enforced again by their actions.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::common::auth::UserRole;
use crate::common::search::normalize_term;
use crate::common::{Page, UserId, WebsiteId};
use crate::domains::moderation::actions::{self as moderation, AdminWebsiteQuery};
use crate::domains::moderation::{DashboardStatsData, RecentSubmissionData};
use crate::domains::user::actions as users;
use crate::domains::user::{UserData, UserStatsData};
use crate::domains::website::data::{AdminWebsitePage, WebsiteData};
use crate::domains::website::models::{ReviewDecision, WebsiteStatus};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResponse, ApiResult};
use crate::server::middleware::RequireUser;
use crate::server::routes::websites::parse_category_filter;

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminWebsitesParams {
    pub search: Option<String>,
    /// A status value; blank or `all` lists every status
    pub status: Option<String>,
    pub category: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl AdminWebsitesParams {
    fn into_query(self) -> Result<AdminWebsiteQuery, ApiError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(
                raw.parse::<WebsiteStatus>()
                    .map_err(|_| ApiError::BadRequest(format!("Unknown status: {raw}")))?,
            ),
        };
        Ok(AdminWebsiteQuery {
            search: self.search,
            status,
            category: parse_category_filter(self.category.as_deref())?,
            page: self.page,
            limit: self.limit,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: ReviewDecision,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularBody {
    pub is_popular: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminUsersParams {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RoleBody {
    pub role: UserRole,
}

/// Admin user table page
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserPage {
    pub users: Vec<UserData>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl From<Page<UserData>> for AdminUserPage {
    fn from(page: Page<UserData>) -> Self {
        Self {
            users: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /api/admin/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> ApiResult<DashboardStatsData> {
    let stats = moderation::dashboard_stats(user.actor(), &state.deps).await?;
    Ok(ApiResponse::ok(stats))
}

/// GET /api/admin/submissions/recent
pub async fn recent_submissions(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(params): Query<RecentParams>,
) -> ApiResult<Vec<RecentSubmissionData>> {
    let rows = moderation::recent_submissions(user.actor(), params.limit, &state.deps).await?;
    Ok(ApiResponse::ok(rows))
}

// =============================================================================
// Websites
// =============================================================================

/// GET /api/admin/websites
pub async fn list_websites(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(params): Query<AdminWebsitesParams>,
) -> ApiResult<AdminWebsitePage> {
    let query = params.into_query()?;
    let page = moderation::list_admin_websites(user.actor(), query, &state.deps).await?;
    Ok(ApiResponse::ok(page))
}

/// POST /api/admin/websites/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<WebsiteId>,
    Json(body): Json<StatusBody>,
) -> ApiResult<WebsiteData> {
    let website = moderation::review_website(user.actor(), id, body.status, &state.deps)
        .await?
        .ok_or(ApiError::NotFound("Website"))?;
    Ok(ApiResponse::ok(website))
}

/// POST /api/admin/websites/{id}/popular
pub async fn set_popular(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<WebsiteId>,
    Json(body): Json<PopularBody>,
) -> ApiResult<WebsiteData> {
    let website = moderation::set_popular(user.actor(), id, body.is_popular, &state.deps)
        .await?
        .ok_or(ApiError::NotFound("Website"))?;
    Ok(ApiResponse::ok(website))
}

/// DELETE /api/admin/websites/{id}
pub async fn delete_website(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<WebsiteId>,
) -> ApiResult<WebsiteId> {
    if !moderation::delete_website(user.actor(), id, &state.deps).await? {
        return Err(ApiError::NotFound("Website"));
    }
    Ok(ApiResponse::ok(id))
}

// =============================================================================
// Users
// =============================================================================

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(params): Query<AdminUsersParams>,
) -> ApiResult<AdminUserPage> {
    let search = normalize_term(params.search.as_deref());
    let page =
        users::list_users(user.actor(), search, params.page, params.limit, &state.deps).await?;
    Ok(ApiResponse::ok(page.into()))
}

/// GET /api/admin/users/stats
pub async fn user_stats(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> ApiResult<UserStatsData> {
    let stats = users::user_stats(user.actor(), &state.deps).await?;
    Ok(ApiResponse::ok(stats))
}

/// POST /api/admin/users/{id}/role
pub async fn update_role(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<UserId>,
    Json(body): Json<RoleBody>,
) -> ApiResult<UserData> {
    let updated = users::update_user_role(user.actor(), id, body.role, &state.deps)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(ApiResponse::ok(updated))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<UserId>,
) -> ApiResult<UserId> {
    if !users::delete_user(user.actor(), id, &state.deps).await? {
        return Err(ApiError::NotFound("User"));
    }
    Ok(ApiResponse::ok(id))
}
