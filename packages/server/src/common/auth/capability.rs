use serde::Serialize;

use super::UserRole;

/// Things a signed-in user may be allowed to do in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Submit a website for review
    SubmitWebsite,

    /// Like or unlike an approved website
    LikeWebsite,

    /// Comment on an approved website
    CommentOnWebsite,

    /// Open the admin area
    AccessAdmin,

    /// Approve/reject submissions and curate the popular flag
    ModerateWebsites,

    /// Edit any website, not just your own
    EditAnyWebsite,

    /// Read dashboard statistics
    ViewAnalytics,

    /// List users, change roles
    ManageUsers,

    /// Permanently delete websites and users
    DeleteWebsites,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::SubmitWebsite,
        Capability::LikeWebsite,
        Capability::CommentOnWebsite,
        Capability::AccessAdmin,
        Capability::ModerateWebsites,
        Capability::EditAnyWebsite,
        Capability::ViewAnalytics,
        Capability::ManageUsers,
        Capability::DeleteWebsites,
    ];

    /// Minimum role that holds this capability.
    pub fn required_role(self) -> UserRole {
        match self {
            Capability::SubmitWebsite | Capability::LikeWebsite | Capability::CommentOnWebsite => {
                UserRole::User
            }
            Capability::AccessAdmin
            | Capability::ModerateWebsites
            | Capability::EditAnyWebsite
            | Capability::ViewAnalytics => UserRole::Moderator,
            Capability::ManageUsers | Capability::DeleteWebsites => UserRole::Admin,
        }
    }
}
