//! Public gallery: listing, visibility, views, likes and comments.

mod common;

use crate::common::*;
use showcase_core::common::{PageArgs, UserRole, WebsiteId};
use showcase_core::domains::website::actions;
use showcase_core::domains::website::data::{CommentInput, SubmitWebsiteInput};
use showcase_core::domains::website::models::{
    SortBy, WebsiteCategory, WebsiteFilters, WebsiteLike, WebsiteStatus,
};
use test_context::test_context;

fn search_for(term: &str) -> WebsiteFilters {
    WebsiteFilters {
        search: Some(term.to_string()),
        ..Default::default()
    }
}

fn submission(title: &str) -> SubmitWebsiteInput {
    SubmitWebsiteInput {
        title: title.to_string(),
        description: "A responsive dashboard with charts and dark mode".to_string(),
        live_url: "https://dashboard.example.com".to_string(),
        source_url: Some("  ".to_string()),
        image_url: "https://cdn.example.com/shot.png".to_string(),
        category: "dashboard".to_string(),
        tags: vec![" charts ".to_string(), "dark-mode".to_string()],
    }
}

// =============================================================================
// Listing
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn listing_only_returns_approved_websites(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let tag = unique_marker();

    let approved = create_approved_website(&ctx.db_pool, &user, "Approved Site", &tag).await;
    create_test_website(&ctx.db_pool, &user, "Pending Site", &tag, WebsiteStatus::Pending).await;
    create_test_website(&ctx.db_pool, &user, "Rejected Site", &tag, WebsiteStatus::Rejected).await;

    // A caller asking for pending websites still only gets approved ones
    let filters = WebsiteFilters {
        status: Some(WebsiteStatus::Pending),
        ..search_for(&tag)
    };
    let list = actions::list_websites(filters, SortBy::Newest, gallery_page(), ctx.deps())
        .await
        .unwrap();

    assert_eq!(list.total, 1);
    assert_eq!(list.websites.len(), 1);
    assert_eq!(list.websites[0].website.id, approved.id);
    assert_eq!(list.websites[0].submitted_by.name, user.name);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn search_matches_title_description_and_exact_tag(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let marker = unique_marker();
    let tag = unique_marker();

    let by_title =
        create_approved_website(&ctx.db_pool, &user, &format!("Shop {}", marker), "shop").await;
    let by_tag = create_approved_website(&ctx.db_pool, &user, "Tagged Site", &tag).await;

    let list = actions::list_websites(
        search_for(&marker.to_uppercase()),
        SortBy::Newest,
        gallery_page(),
        ctx.deps(),
    )
    .await
    .unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.websites[0].website.id, by_title.id);

    let list = actions::list_websites(search_for(&tag), SortBy::Newest, gallery_page(), ctx.deps())
        .await
        .unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.websites[0].website.id, by_tag.id);

    // Tags match exactly, not by substring
    let list = actions::list_websites(
        search_for(&tag[..5]),
        SortBy::Newest,
        gallery_page(),
        ctx.deps(),
    )
    .await
    .unwrap();
    assert!(list.websites.iter().all(|w| w.website.id != by_tag.id));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn listing_sorts_by_views_and_pages(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let tag = unique_marker();

    let low = create_ranked_website(&ctx.db_pool, &user, "Low Views", &tag, false, 10).await;
    let high = create_ranked_website(&ctx.db_pool, &user, "High Views", &tag, false, 900).await;
    let mid = create_ranked_website(&ctx.db_pool, &user, "Mid Views", &tag, true, 300).await;

    let list = actions::list_websites(
        search_for(&tag),
        SortBy::Views,
        PageArgs::new(Some(2), None, actions::GALLERY_PAGE_SIZE),
        ctx.deps(),
    )
    .await
    .unwrap();
    assert_eq!(list.total, 3);
    assert_eq!(list.total_pages, 2);
    let ids: Vec<_> = list.websites.iter().map(|w| w.website.id).collect();
    assert_eq!(ids, vec![high.id, mid.id]);

    let list = actions::list_websites(
        search_for(&tag),
        SortBy::Views,
        PageArgs::new(Some(2), Some(2), actions::GALLERY_PAGE_SIZE),
        ctx.deps(),
    )
    .await
    .unwrap();
    assert_eq!(list.websites.len(), 1);
    assert_eq!(list.websites[0].website.id, low.id);

    let popular_only = WebsiteFilters {
        is_popular: Some(true),
        ..search_for(&tag)
    };
    let list = actions::list_websites(popular_only, SortBy::Popular, gallery_page(), ctx.deps())
        .await
        .unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.websites[0].website.id, mid.id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn default_page_returns_every_match(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let tag = unique_marker();

    for title in ["First Match", "Second Match", "Third Match"] {
        create_approved_website(&ctx.db_pool, &user, title, &tag).await;
    }

    let list = actions::list_websites(search_for(&tag), SortBy::Newest, gallery_page(), ctx.deps())
        .await
        .unwrap();
    assert_eq!(list.total, 3);
    assert_eq!(list.websites.len(), 3);
    assert_eq!(list.limit, actions::GALLERY_PAGE_SIZE);
    assert_eq!(list.total_pages, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn category_filter_applies(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let tag = unique_marker();

    // Portfolio
    create_approved_website(&ctx.db_pool, &user, "Portfolio Site", &tag).await;
    // Saas
    let saas = create_ranked_website(&ctx.db_pool, &user, "Saas Site", &tag, false, 0).await;

    let filters = WebsiteFilters {
        category: Some(WebsiteCategory::Saas),
        ..search_for(&tag)
    };
    let list = actions::list_websites(filters, SortBy::Newest, gallery_page(), ctx.deps())
        .await
        .unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.websites.len(), 1);
    assert_eq!(list.websites[0].website.id, saas.id);
    assert!(list
        .websites
        .iter()
        .all(|w| w.website.category == WebsiteCategory::Saas));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn listing_sorts_by_age_likes_and_popularity(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, UserRole::User).await;
    let fan = create_test_user(&ctx.db_pool, UserRole::User).await;
    let other = create_test_user(&ctx.db_pool, UserRole::User).await;
    let tag = unique_marker();

    let a = create_ranked_website(&ctx.db_pool, &owner, "Site A", &tag, false, 0).await;
    let b = create_ranked_website(&ctx.db_pool, &owner, "Site B", &tag, true, 0).await;
    let c = create_ranked_website(&ctx.db_pool, &owner, "Site C", &tag, false, 0).await;

    WebsiteLike::insert(a.id, fan.id, &ctx.db_pool).await.unwrap();
    WebsiteLike::insert(c.id, fan.id, &ctx.db_pool).await.unwrap();
    WebsiteLike::insert(c.id, other.id, &ctx.db_pool).await.unwrap();

    let order = |sort: SortBy| {
        let filters = search_for(&tag);
        async move {
            actions::list_websites(filters, sort, gallery_page(), ctx.deps())
                .await
                .unwrap()
                .websites
                .into_iter()
                .map(|w| w.website.id)
                .collect::<Vec<WebsiteId>>()
        }
    };

    assert_eq!(order(SortBy::Oldest).await, vec![a.id, b.id, c.id]);
    assert_eq!(order(SortBy::Newest).await, vec![c.id, b.id, a.id]);
    assert_eq!(order(SortBy::Likes).await, vec![c.id, a.id, b.id]);
    // Popular first, then newest first
    assert_eq!(order(SortBy::Popular).await, vec![b.id, c.id, a.id]);
}

// =============================================================================
// Submission and visibility
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn submission_is_pending_and_hidden_until_approved(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let other = create_test_user(&ctx.db_pool, UserRole::User).await;
    let moderator = create_test_user(&ctx.db_pool, UserRole::Moderator).await;
    let title = format!("Dashboard {}", unique_marker());

    let website = actions::submit_website(user.actor(), submission(&title), ctx.deps())
        .await
        .unwrap();
    assert_eq!(website.status, WebsiteStatus::Pending);
    assert_eq!(website.source_url, None);
    assert_eq!(website.tags, vec!["charts".to_string(), "dark-mode".to_string()]);
    assert!(website.published_at.is_none());

    let list = actions::list_websites(search_for(&title), SortBy::Newest, gallery_page(), ctx.deps())
        .await
        .unwrap();
    assert_eq!(list.total, 0);

    // Hidden from the public and other users, visible to its submitter and moderators
    assert!(actions::get_website(website.id, None, ctx.deps()).await.unwrap().is_none());
    assert!(actions::get_website(website.id, Some(other.actor()), ctx.deps())
        .await
        .unwrap()
        .is_none());
    assert!(actions::get_website(website.id, Some(user.actor()), ctx.deps())
        .await
        .unwrap()
        .is_some());
    assert!(actions::get_website(website.id, Some(moderator.actor()), ctx.deps())
        .await
        .unwrap()
        .is_some());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invalid_submission_is_rejected(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;

    let mut input = submission("Valid Title");
    input.description = "too short".to_string();

    let err = actions::submit_website(user.actor(), input, ctx.deps())
        .await
        .unwrap_err();
    let errors = err
        .downcast_ref::<validator::ValidationErrors>()
        .expect("validation errors");
    assert!(errors.field_errors().contains_key("description"));
}

// =============================================================================
// Views
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn views_count_only_on_approved_websites(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let tag = unique_marker();
    let approved = create_approved_website(&ctx.db_pool, &user, "Viewed Site", &tag).await;
    let pending =
        create_test_website(&ctx.db_pool, &user, "Unseen Site", &tag, WebsiteStatus::Pending).await;

    let first = actions::record_view(approved.id, ctx.deps()).await.unwrap().unwrap();
    let second = actions::record_view(approved.id, ctx.deps()).await.unwrap().unwrap();
    assert_eq!(first.view_count, 1);
    assert_eq!(second.view_count, 2);

    assert!(actions::record_view(pending.id, ctx.deps()).await.unwrap().is_none());
}

// =============================================================================
// Likes
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn like_toggles_back_and_forth(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, UserRole::User).await;
    let fan = create_test_user(&ctx.db_pool, UserRole::User).await;
    let other = create_test_user(&ctx.db_pool, UserRole::User).await;
    let website = create_approved_website(&ctx.db_pool, &owner, "Liked Site", &unique_marker()).await;

    let liked = actions::toggle_like(fan.actor(), website.id, ctx.deps())
        .await
        .unwrap()
        .unwrap();
    assert!(liked.liked);
    assert_eq!(liked.like_count, 1);

    let also = actions::toggle_like(other.actor(), website.id, ctx.deps())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(also.like_count, 2);

    let unliked = actions::toggle_like(fan.actor(), website.id, ctx.deps())
        .await
        .unwrap()
        .unwrap();
    assert!(!unliked.liked);
    assert_eq!(unliked.like_count, 1);

    let details = actions::get_website(website.id, None, ctx.deps())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.like_count, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_like_toggles_never_duplicate(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, UserRole::User).await;
    let fan = create_test_user(&ctx.db_pool, UserRole::User).await;
    let website =
        create_approved_website(&ctx.db_pool, &owner, "Contended Site", &unique_marker()).await;

    for toggles in [2, 3, 8] {
        let handles: Vec<_> = (0..toggles)
            .map(|_| {
                let pool = ctx.db_pool.clone();
                let (website_id, user_id) = (website.id, fan.id);
                tokio::spawn(async move { WebsiteLike::toggle(website_id, user_id, &pool).await })
            })
            .collect();

        for handle in handles {
            let liked = handle.await.unwrap().unwrap();
            assert!(liked.is_some());
        }

        let count = WebsiteLike::count_for_website(website.id, &ctx.db_pool)
            .await
            .unwrap();
        assert!(count <= 1, "{toggles} toggles left {count} likes");
        let exists = WebsiteLike::exists(website.id, fan.id, &ctx.db_pool)
            .await
            .unwrap();
        assert_eq!(exists, count == 1);
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn likes_require_an_approved_website(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let pending = create_test_website(
        &ctx.db_pool,
        &user,
        "Pending Like",
        &unique_marker(),
        WebsiteStatus::Pending,
    )
    .await;

    assert!(actions::toggle_like(user.actor(), pending.id, ctx.deps())
        .await
        .unwrap()
        .is_none());
    assert!(actions::toggle_like(user.actor(), WebsiteId::new(), ctx.deps())
        .await
        .unwrap()
        .is_none());
    assert!(!WebsiteLike::exists(pending.id, user.id, &ctx.db_pool).await.unwrap());
}

// =============================================================================
// Comments
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn comments_are_listed_newest_first(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, UserRole::User).await;
    let commenter = create_test_user(&ctx.db_pool, UserRole::User).await;
    let website =
        create_approved_website(&ctx.db_pool, &owner, "Commented Site", &unique_marker()).await;

    for content in ["First!", "  Second thoughts  "] {
        actions::add_comment(
            &commenter,
            website.id,
            CommentInput {
                content: content.to_string(),
            },
            ctx.deps(),
        )
        .await
        .unwrap()
        .unwrap();
    }

    let comments = actions::list_comments(website.id, ctx.deps())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "Second thoughts");
    assert_eq!(comments[1].content, "First!");
    assert_eq!(comments[0].author.name, commenter.name);

    let details = actions::get_website(website.id, None, ctx.deps())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.comment_count, 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn blank_comment_is_rejected(ctx: &TestHarness) {
    let user = create_test_user(&ctx.db_pool, UserRole::User).await;
    let website = create_approved_website(&ctx.db_pool, &user, "Quiet Site", &unique_marker()).await;

    let err = actions::add_comment(
        &user,
        website.id,
        CommentInput {
            content: "   ".to_string(),
        },
        ctx.deps(),
    )
    .await
    .unwrap_err();
    assert!(err.downcast_ref::<validator::ValidationErrors>().is_some());
}
