//! Offset-based pagination types
//!
//! Public listings take a raw `limit`/`offset` pair, admin tables take a
//! 1-based `page`. Both normalize into [`ValidatedPageArgs`] before reaching
//! a model, and both report `total_pages = ceil(total / limit)`.
//!
//! # Usage
//!
//! ```rust,ignore
//! let args = PageArgs::from_page(query.page, query.limit, 10).validate();
//! let (rows, total) = Website::find_admin_list(&filters, &args, pool).await?;
//! let page = Page::new(rows, total, &args);
//! ```

use serde::Serialize;

/// Largest page any endpoint will serve.
pub const MAX_PAGE_SIZE: i64 = 100;

// ============================================================================
// Pagination Arguments
// ============================================================================

/// Raw pagination input, straight from a query string.
///
/// There is no `Default`: every caller names the page size it falls back to.
#[derive(Debug, Clone)]
pub struct PageArgs {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    default_limit: i64,
}

impl PageArgs {
    /// Limit/offset style input.
    pub fn new(limit: Option<i64>, offset: Option<i64>, default_limit: i64) -> Self {
        PageArgs {
            limit,
            offset,
            default_limit,
        }
    }

    /// Page-number style input (1-based). Pages below 1 are treated as 1.
    pub fn from_page(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        let limit_value = clamp_limit(limit.unwrap_or(default_limit));
        let page = page.unwrap_or(1).max(1);
        PageArgs {
            limit,
            offset: Some((page - 1).saturating_mul(limit_value)),
            default_limit,
        }
    }

    /// Apply defaults and bounds (limit 1..=100, offset >= 0).
    pub fn validate(&self) -> ValidatedPageArgs {
        ValidatedPageArgs {
            limit: clamp_limit(self.limit.unwrap_or(self.default_limit)),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Validated and normalized pagination arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPageArgs {
    /// Number of rows to fetch (1-100).
    pub limit: i64,
    /// Number of rows to skip (>= 0).
    pub offset: i64,
}

impl ValidatedPageArgs {
    /// 1-based page number this window starts on.
    pub fn page(&self) -> i64 {
        self.offset / self.limit + 1
    }
}

/// `ceil(total / limit)`; zero rows means zero pages.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

// ============================================================================
// Page envelope
// ============================================================================

/// One page of results plus the numbers a client needs to paginate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, args: &ValidatedPageArgs) -> Self {
        Page {
            items,
            total,
            page: args.page(),
            limit: args.limit,
            total_pages: total_pages(total, args.limit),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
