//! Moderation: review decisions, popular flag, deletion and the dashboard.

mod common;

use crate::common::*;
use showcase_core::common::{AuthError, UserRole};
use showcase_core::domains::moderation::actions::{self, AdminWebsiteQuery};
use showcase_core::domains::website::actions as gallery;
use showcase_core::domains::website::models::{
    ReviewDecision, SortBy, Website, WebsiteComment, WebsiteFilters, WebsiteLike, WebsiteStatus,
};
use test_context::test_context;

fn auth_error(err: anyhow::Error) -> AuthError {
    err.downcast::<AuthError>().expect("expected an authorization error")
}

// =============================================================================
// Review decisions
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn approving_publishes_the_website(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let moderator = create_test_user(&ctx.db_pool, UserRole::Moderator).await;
    let tag = unique_marker();
    let website = create_test_website(
        &ctx.db_pool,
        &user,
        "Awaiting Review",
        &tag,
        WebsiteStatus::Pending,
    )
    .await;
    let gallery_search = WebsiteFilters {
        search: Some(tag),
        ..Default::default()
    };

    let before = gallery::list_websites(
        gallery_search.clone(),
        SortBy::Newest,
        gallery_page(),
        ctx.deps(),
    )
    .await
    .unwrap();
    assert_eq!(before.total, 0);

    let approved = actions::review_website(
        moderator.actor(),
        website.id,
        ReviewDecision::Approved,
        ctx.deps(),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(approved.status, WebsiteStatus::Approved);
    assert!(approved.published_at.is_some());

    let stored = Website::find_by_id(website.id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(stored.reviewed_by, Some(moderator.id));

    let after = gallery::list_websites(gallery_search, SortBy::Newest, gallery_page(), ctx.deps())
        .await
        .unwrap();
    assert_eq!(after.total, 1);
    assert_eq!(after.websites[0].website.id, website.id);
    assert!(after.websites[0].website.published_at.is_some());

    let details = gallery::get_website(website.id, None, ctx.deps())
        .await
        .unwrap()
        .expect("approved website is public");
    assert_eq!(details.reviewed_by.map(|r| r.name), Some(moderator.name));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rejecting_keeps_an_earlier_publish_time(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let admin = create_test_user(&ctx.db_pool, UserRole::Admin).await;
    let website = create_approved_website(&ctx.db_pool, &user, "Was Public", &unique_marker()).await;
    let published_at = website.published_at;

    let rejected = actions::review_website(admin.actor(), website.id, ReviewDecision::Rejected, ctx.deps())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rejected.status, WebsiteStatus::Rejected);
    assert_eq!(rejected.published_at, published_at);

    assert!(gallery::get_website(website.id, None, ctx.deps())
        .await
        .unwrap()
        .is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn users_cannot_review(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let website = create_test_website(
        &ctx.db_pool,
        &user,
        "Self Approved",
        &unique_marker(),
        WebsiteStatus::Pending,
    )
    .await;

    let err = actions::review_website(user.actor(), website.id, ReviewDecision::Approved, ctx.deps())
        .await
        .unwrap_err();
    assert!(matches!(auth_error(err), AuthError::InsufficientRole { .. }));

    let stored = Website::find_by_id(website.id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(stored.status, WebsiteStatus::Pending);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reviewing_a_missing_website_returns_none(ctx: &TestHarness) {
    let moderator = create_test_user(&ctx.db_pool, UserRole::Moderator).await;

    let result = actions::review_website(
        moderator.actor(),
        showcase_core::common::WebsiteId::new(),
        ReviewDecision::Approved,
        ctx.deps(),
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

// =============================================================================
// Popular flag and deletion
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn popular_flag_needs_a_moderator(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let moderator = create_test_user(&ctx.db_pool, UserRole::Moderator).await;
    let website = create_approved_website(&ctx.db_pool, &user, "Feature Me", &unique_marker()).await;

    let err = actions::set_popular(user.actor(), website.id, true, ctx.deps())
        .await
        .unwrap_err();
    assert!(matches!(auth_error(err), AuthError::InsufficientRole { .. }));

    let featured = actions::set_popular(moderator.actor(), website.id, true, ctx.deps())
        .await
        .unwrap()
        .unwrap();
    assert!(featured.is_popular);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_a_website_removes_likes_and_comments(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let moderator = create_test_user(&ctx.db_pool, UserRole::Moderator).await;
    let admin = create_test_user(&ctx.db_pool, UserRole::Admin).await;
    let website = create_approved_website(&ctx.db_pool, &user, "Doomed Site", &unique_marker()).await;

    let err = actions::delete_website(moderator.actor(), website.id, ctx.deps())
        .await
        .unwrap_err();
    assert!(matches!(auth_error(err), AuthError::InsufficientRole { .. }));

    WebsiteLike::insert(website.id, user.id, &ctx.db_pool).await.unwrap();
    WebsiteComment::create(website.id, user.id, "Nice work", &ctx.db_pool)
        .await
        .unwrap();

    assert!(actions::delete_website(admin.actor(), website.id, ctx.deps()).await.unwrap());
    assert!(!actions::delete_website(admin.actor(), website.id, ctx.deps()).await.unwrap());

    assert!(Website::find_by_id(website.id, &ctx.db_pool).await.unwrap().is_none());
    assert_eq!(
        WebsiteLike::count_for_website(website.id, &ctx.db_pool).await.unwrap(),
        0
    );
    assert!(WebsiteComment::find_for_website(website.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
}

// =============================================================================
// Admin table and dashboard
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn admin_table_lists_every_status(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let moderator = create_test_user(&ctx.db_pool, UserRole::Moderator).await;
    let marker = unique_marker();
    let tag = unique_marker();
    let pending_title = format!("Admin Pending {}", marker);

    create_approved_website(&ctx.db_pool, &user, &format!("Admin Approved {}", marker), &tag).await;
    create_test_website(&ctx.db_pool, &user, &pending_title, &tag, WebsiteStatus::Pending).await;
    create_test_website(
        &ctx.db_pool,
        &user,
        &format!("Admin Rejected {}", marker),
        &tag,
        WebsiteStatus::Rejected,
    )
    .await;

    let all = actions::list_admin_websites(
        moderator.actor(),
        AdminWebsiteQuery {
            search: Some(marker.clone()),
            ..Default::default()
        },
        ctx.deps(),
    )
    .await
    .unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.websites.len(), 3);
    assert_eq!(all.page, 1);
    assert_eq!(all.total_pages, 1);

    let pending = actions::list_admin_websites(
        moderator.actor(),
        AdminWebsiteQuery {
            search: Some(marker),
            status: Some(WebsiteStatus::Pending),
            ..Default::default()
        },
        ctx.deps(),
    )
    .await
    .unwrap();
    assert_eq!(pending.total, 1);
    assert_eq!(pending.websites[0].website.title, pending_title);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn admin_search_ignores_tags(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let moderator = create_test_user(&ctx.db_pool, UserRole::Moderator).await;
    let tag = unique_marker();
    let website = create_approved_website(&ctx.db_pool, &user, "Tag Only Match", &tag).await;

    let admin = actions::list_admin_websites(
        moderator.actor(),
        AdminWebsiteQuery {
            search: Some(tag.clone()),
            ..Default::default()
        },
        ctx.deps(),
    )
    .await
    .unwrap();
    assert_eq!(admin.total, 0);

    // The public gallery still finds it by tag
    let public = gallery::list_websites(
        WebsiteFilters {
            search: Some(tag),
            ..Default::default()
        },
        SortBy::Newest,
        gallery_page(),
        ctx.deps(),
    )
    .await
    .unwrap();
    assert_eq!(public.total, 1);
    assert_eq!(public.websites[0].website.id, website.id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn dashboard_counts_reflect_new_activity(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let admin = create_test_user(&ctx.db_pool, UserRole::Admin).await;

    let website = create_test_website(
        &ctx.db_pool,
        &user,
        "Dashboard Entry",
        &unique_marker(),
        WebsiteStatus::Pending,
    )
    .await;
    actions::review_website(admin.actor(), website.id, ReviewDecision::Approved, ctx.deps())
        .await
        .unwrap();

    let stats = actions::dashboard_stats(admin.actor(), ctx.deps()).await.unwrap();
    assert!(stats.total_websites >= 1);
    assert!(stats.total_users >= 2);
    assert!(stats.approved_today >= 1);
    assert!(stats.growth_rate.is_finite());

    let recent = actions::recent_submissions(admin.actor(), Some(100), ctx.deps())
        .await
        .unwrap();
    assert!(recent.iter().any(|r| r.id == website.id && r.submitted_by == user.name));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn dashboard_requires_admin_access(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;

    let err = actions::dashboard_stats(user.actor(), ctx.deps()).await.unwrap_err();
    assert!(matches!(auth_error(err), AuthError::InsufficientRole { .. }));

    let err = actions::recent_submissions(user.actor(), None, ctx.deps())
        .await
        .unwrap_err();
    assert!(matches!(auth_error(err), AuthError::InsufficientRole { .. }));
}
