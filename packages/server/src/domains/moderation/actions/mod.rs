//! Moderation actions - dashboard, review queue, website management
//!
//! Moderators review and curate. Deleting a website needs an admin.

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

use crate::common::auth::{Actor, Capability};
use crate::common::pagination::MAX_PAGE_SIZE;
use crate::common::search::normalize_term;
use crate::common::{Page, PageArgs, WebsiteId};
use crate::domains::moderation::data::{DashboardStatsData, RecentSubmissionData};
use crate::domains::moderation::models::{DashboardCounts, DashboardWindow, RecentSubmission};
use crate::domains::website::data::{AdminWebsitePage, WebsiteData, WebsiteDetailsData};
use crate::domains::website::models::{
    ReviewDecision, SortBy, Website, WebsiteCategory, WebsiteFilters, WebsiteStatus,
    WebsiteWithDetails,
};
use crate::kernel::ServerDeps;

/// Default length of the recent submissions feed
pub const RECENT_SUBMISSIONS_LIMIT: i64 = 5;

/// Default page size of the admin website table
pub const ADMIN_WEBSITES_PAGE_SIZE: i64 = 10;

/// Admin website table query
#[derive(Debug, Clone, Default)]
pub struct AdminWebsiteQuery {
    pub search: Option<String>,
    /// `None` lists every status
    pub status: Option<WebsiteStatus>,
    pub category: Option<WebsiteCategory>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Dashboard header numbers
pub async fn dashboard_stats(actor: Actor, deps: &ServerDeps) -> Result<DashboardStatsData> {
    actor.can(Capability::ViewAnalytics).check()?;

    let window = DashboardWindow::at(Utc::now());
    let counts = DashboardCounts::load(&window, &deps.db_pool).await?;
    Ok(counts.into())
}

/// Newest submissions of any status
pub async fn recent_submissions(
    actor: Actor,
    limit: Option<i64>,
    deps: &ServerDeps,
) -> Result<Vec<RecentSubmissionData>> {
    actor.can(Capability::AccessAdmin).check()?;

    let limit = limit
        .unwrap_or(RECENT_SUBMISSIONS_LIMIT)
        .clamp(1, MAX_PAGE_SIZE);
    let rows = RecentSubmission::find_recent(limit, &deps.db_pool).await?;
    Ok(rows.into_iter().map(RecentSubmissionData::from).collect())
}

/// Paginated admin website table, newest first
pub async fn list_admin_websites(
    actor: Actor,
    query: AdminWebsiteQuery,
    deps: &ServerDeps,
) -> Result<AdminWebsitePage> {
    actor.can(Capability::ModerateWebsites).check()?;

    let args = PageArgs::from_page(query.page, query.limit, ADMIN_WEBSITES_PAGE_SIZE).validate();
    let filters = WebsiteFilters {
        search: normalize_term(query.search.as_deref()),
        search_tags: false,
        category: query.category,
        is_popular: None,
        status: query.status,
    };
    debug!(filters = ?filters, page = args.page(), "Listing admin websites");

    let rows =
        WebsiteWithDetails::find_listing(&filters, SortBy::Newest, &args, &deps.db_pool).await?;
    let total = WebsiteWithDetails::count_listing(&filters, &deps.db_pool).await?;

    let page = Page::new(rows, total, &args).map(WebsiteDetailsData::from);
    Ok(page.into())
}

/// Approve or reject a website. Returns `None` if it does not exist.
pub async fn review_website(
    actor: Actor,
    id: WebsiteId,
    decision: ReviewDecision,
    deps: &ServerDeps,
) -> Result<Option<WebsiteData>> {
    actor.can(Capability::ModerateWebsites).check()?;

    info!(website_id = %id, reviewer = %actor.id(), decision = ?decision, "Reviewing website");
    let website = Website::update_status(id, decision, actor.id(), &deps.db_pool).await?;
    Ok(website.map(WebsiteData::from))
}

/// Feature or un-feature a website
pub async fn set_popular(
    actor: Actor,
    id: WebsiteId,
    is_popular: bool,
    deps: &ServerDeps,
) -> Result<Option<WebsiteData>> {
    actor.can(Capability::EditAnyWebsite).check()?;

    info!(website_id = %id, is_popular, "Setting popular flag");
    let website = Website::set_popular(id, is_popular, &deps.db_pool).await?;
    Ok(website.map(WebsiteData::from))
}

/// Delete a website. Returns whether it existed.
pub async fn delete_website(actor: Actor, id: WebsiteId, deps: &ServerDeps) -> Result<bool> {
    actor.can(Capability::DeleteWebsites).check()?;

    info!(website_id = %id, actor_id = %actor.id(), "Deleting website");
    Website::delete(id, &deps.db_pool).await
}
