use serde::Serialize;

use crate::common::auth::UserRole;
use crate::domains::website::models::{SortBy, WebsiteCategory, WebsiteStatus};

/// A closed-list value with its display label
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OptionData {
    pub value: &'static str,
    pub label: &'static str,
}

/// Every enum domain the client renders pickers for
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    pub categories: Vec<OptionData>,
    pub statuses: Vec<OptionData>,
    pub roles: Vec<OptionData>,
    pub sort_options: Vec<OptionData>,
}

impl MetaData {
    pub fn current() -> Self {
        Self {
            categories: WebsiteCategory::ALL
                .into_iter()
                .map(|c| OptionData {
                    value: c.as_str(),
                    label: c.label(),
                })
                .collect(),
            statuses: WebsiteStatus::ALL
                .into_iter()
                .map(|s| OptionData {
                    value: s.as_str(),
                    label: s.label(),
                })
                .collect(),
            roles: UserRole::ALL
                .into_iter()
                .map(|r| OptionData {
                    value: r.as_str(),
                    label: r.label(),
                })
                .collect(),
            sort_options: SortBy::ALL
                .into_iter()
                .map(|s| OptionData {
                    value: s.as_str(),
                    label: s.label(),
                })
                .collect(),
        }
    }
}
