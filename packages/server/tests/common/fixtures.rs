//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use chrono::Utc;
use showcase_core::common::{PageArgs, UserId, UserRole};
use showcase_core::domains::user::User;
use showcase_core::domains::website::actions::GALLERY_PAGE_SIZE;
use showcase_core::domains::website::models::{
    ImportedState, NewWebsite, Website, WebsiteCategory, WebsiteStatus,
};
use sqlx::PgPool;
use uuid::Uuid;

/// A short random marker for names that must not collide between tests
pub fn unique_marker() -> String {
    Uuid::new_v4().simple().to_string()[..10].to_string()
}

/// First page of the public gallery at its default size
pub fn gallery_page() -> PageArgs {
    PageArgs::new(None, None, GALLERY_PAGE_SIZE)
}

/// Create a user with a role
pub async fn create_test_user(pool: &PgPool, role: UserRole) -> User {
    let marker = unique_marker();
    User::create(
        UserId::new(),
        &format!("Test {} {}", role, marker),
        &format!("{}-{}@example.com", role, marker),
        true,
        None,
        role,
        pool,
    )
    .await
    .expect("Failed to create test user")
}

/// Submission input for a website titled `title`, tagged with `tag`
pub fn new_website(title: &str, tag: &str, category: WebsiteCategory) -> NewWebsite {
    NewWebsite {
        title: title.to_string(),
        description: format!("{} is a showcase website used by the tests", title),
        image_url: "https://images.unsplash.com/photo-1519389950473-47ba0277781c".to_string(),
        source_url: None,
        live_url: "https://example.com".to_string(),
        tags: vec![tag.to_string(), "testing".to_string()],
        category,
    }
}

/// Create a website directly in `status`
pub async fn create_test_website(
    pool: &PgPool,
    submitter: &User,
    title: &str,
    tag: &str,
    status: WebsiteStatus,
) -> Website {
    let state = ImportedState {
        status,
        is_popular: false,
        view_count: 0,
        reviewed_by: None,
        published_at: (status == WebsiteStatus::Approved).then(Utc::now),
    };
    Website::import(
        &new_website(title, tag, WebsiteCategory::Portfolio),
        &state,
        submitter.id,
        pool,
    )
    .await
    .expect("Failed to create test website")
}

/// Create an approved website
pub async fn create_approved_website(
    pool: &PgPool,
    submitter: &User,
    title: &str,
    tag: &str,
) -> Website {
    create_test_website(pool, submitter, title, tag, WebsiteStatus::Approved).await
}

/// Create a website with explicit counters, for sort tests
pub async fn create_ranked_website(
    pool: &PgPool,
    submitter: &User,
    title: &str,
    tag: &str,
    is_popular: bool,
    view_count: i32,
) -> Website {
    let state = ImportedState {
        status: WebsiteStatus::Approved,
        is_popular,
        view_count,
        reviewed_by: None,
        published_at: Some(Utc::now()),
    };
    Website::import(
        &new_website(title, tag, WebsiteCategory::Saas),
        &state,
        submitter.id,
        pool,
    )
    .await
    .expect("Failed to create test website")
}
