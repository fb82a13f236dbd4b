//! Typed ID definitions for all domain entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities.
pub struct User;

/// Marker type for Website submissions.
pub struct Website;

/// Marker type for WebsiteLike join rows.
pub struct WebsiteLike;

/// Marker type for WebsiteComment entities.
pub struct WebsiteComment;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;

pub type WebsiteId = Id<Website>;

pub type LikeId = Id<WebsiteLike>;

pub type CommentId = Id<WebsiteComment>;
