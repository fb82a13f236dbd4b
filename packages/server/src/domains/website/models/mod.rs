pub mod comment;
pub mod like;
pub mod listing;
pub mod website;

pub use comment::{CommentWithAuthor, WebsiteComment};
pub use like::WebsiteLike;
pub use listing::{SortBy, WebsiteFilters, WebsiteWithDetails};
pub use website::{
    ImportedState, NewWebsite, ReviewDecision, Website, WebsiteCategory, WebsiteStatus,
};
