pub mod meta;
pub mod submission;
pub mod website;

pub use meta::{MetaData, OptionData};
pub use submission::{CommentInput, SubmitWebsiteInput};
pub use website::{
    AdminWebsitePage, CommentData, LikeData, ViewData, WebsiteData, WebsiteDetailsData,
    WebsiteListData,
};
