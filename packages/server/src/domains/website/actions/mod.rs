//! Website actions - public gallery, submissions, likes, views, comments
//!
//! Each action checks its own capability. Not-found is reported as `None`
//! so the HTTP layer can decide between `data: null` and a 404.

use anyhow::Result;
use tracing::{debug, info};
use validator::Validate;

use crate::common::auth::{Actor, Capability};
use crate::common::{PageArgs, WebsiteId};
use crate::domains::user::User;
use crate::domains::website::data::{
    CommentData, CommentInput, LikeData, SubmitWebsiteInput, ViewData, WebsiteData,
    WebsiteDetailsData, WebsiteListData,
};
use crate::domains::website::models::{
    CommentWithAuthor, SortBy, Website, WebsiteComment, WebsiteFilters, WebsiteLike,
    WebsiteStatus, WebsiteWithDetails,
};
use crate::kernel::ServerDeps;

/// Default page size of the public gallery
pub const GALLERY_PAGE_SIZE: i64 = 12;

/// Public gallery listing. Only approved websites are ever returned, and a
/// search term also matches exact tags.
pub async fn list_websites(
    filters: WebsiteFilters,
    sort: SortBy,
    args: PageArgs,
    deps: &ServerDeps,
) -> Result<WebsiteListData> {
    let filters = WebsiteFilters {
        status: Some(WebsiteStatus::Approved),
        search_tags: true,
        ..filters
    };
    let args = args.validate();
    debug!(filters = ?filters, sort = ?sort, limit = args.limit, offset = args.offset, "Listing websites");

    let rows = WebsiteWithDetails::find_listing(&filters, sort, &args, &deps.db_pool).await?;
    let total = WebsiteWithDetails::count_listing(&filters, &deps.db_pool).await?;

    Ok(WebsiteListData {
        websites: rows.into_iter().map(WebsiteDetailsData::from).collect(),
        total,
        limit: args.limit,
        offset: args.offset,
        total_pages: crate::common::total_pages(total, args.limit),
    })
}

/// A single website.
///
/// Approved websites are visible to everyone. Others only to their
/// submitter and to moderators.
pub async fn get_website(
    id: WebsiteId,
    viewer: Option<Actor>,
    deps: &ServerDeps,
) -> Result<Option<WebsiteDetailsData>> {
    let Some(row) = WebsiteWithDetails::find_detail_by_id(id, &deps.db_pool).await? else {
        return Ok(None);
    };

    let visible = row.website.status == WebsiteStatus::Approved
        || viewer.is_some_and(|actor| {
            actor.id() == row.website.submitted_by
                || actor.can(Capability::ModerateWebsites).check().is_ok()
        });

    Ok(visible.then(|| row.into()))
}

/// Submit a website for review. The submitter is always the caller.
pub async fn submit_website(
    actor: Actor,
    input: SubmitWebsiteInput,
    deps: &ServerDeps,
) -> Result<WebsiteData> {
    actor.can(Capability::SubmitWebsite).check()?;

    let input = input.normalize();
    input.validate()?;
    let new = input.into_new_website()?;

    let website = Website::create(&new, actor.id(), &deps.db_pool).await?;
    info!(
        website_id = %website.id,
        submitted_by = %actor.id(),
        category = %website.category,
        "Website submitted for review"
    );

    Ok(website.into())
}

/// Count a view of an approved website
pub async fn record_view(id: WebsiteId, deps: &ServerDeps) -> Result<Option<ViewData>> {
    let view_count = Website::increment_views(id, &deps.db_pool).await?;
    Ok(view_count.map(|view_count| ViewData { view_count }))
}

/// Like or unlike an approved website
pub async fn toggle_like(
    actor: Actor,
    website_id: WebsiteId,
    deps: &ServerDeps,
) -> Result<Option<LikeData>> {
    actor.can(Capability::LikeWebsite).check()?;

    if !Website::is_public(website_id, &deps.db_pool).await? {
        return Ok(None);
    }

    // The website can still vanish between the check and the toggle
    let Some(liked) = WebsiteLike::toggle(website_id, actor.id(), &deps.db_pool).await? else {
        return Ok(None);
    };
    let like_count = WebsiteLike::count_for_website(website_id, &deps.db_pool).await?;

    debug!(website_id = %website_id, user_id = %actor.id(), liked, "Like toggled");
    Ok(Some(LikeData { liked, like_count }))
}

/// Comments on an approved website, newest first
pub async fn list_comments(
    website_id: WebsiteId,
    deps: &ServerDeps,
) -> Result<Option<Vec<CommentData>>> {
    if !Website::is_public(website_id, &deps.db_pool).await? {
        return Ok(None);
    }

    let comments = WebsiteComment::find_for_website(website_id, &deps.db_pool).await?;
    Ok(Some(comments.into_iter().map(CommentData::from).collect()))
}

/// Append a comment to an approved website
pub async fn add_comment(
    author: &User,
    website_id: WebsiteId,
    input: CommentInput,
    deps: &ServerDeps,
) -> Result<Option<CommentData>> {
    author.actor().can(Capability::CommentOnWebsite).check()?;

    let input = input.normalize();
    input.validate()?;

    if !Website::is_public(website_id, &deps.db_pool).await? {
        return Ok(None);
    }

    let comment =
        WebsiteComment::create(website_id, author.id, &input.content, &deps.db_pool).await?;
    info!(comment_id = %comment.id, website_id = %website_id, user_id = %author.id, "Comment added");

    Ok(Some(
        CommentWithAuthor {
            comment,
            author_name: author.name.clone(),
            author_image: author.image.clone(),
        }
        .into(),
    ))
}
