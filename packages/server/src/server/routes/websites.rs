//! Public gallery routes

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::common::search::normalize_term;
use crate::common::{PageArgs, WebsiteId};
use crate::domains::website::actions::{self, GALLERY_PAGE_SIZE};
use crate::domains::website::data::{
    CommentData, CommentInput, LikeData, SubmitWebsiteInput, ViewData, WebsiteData,
    WebsiteDetailsData, WebsiteListData,
};
use crate::domains::website::models::{SortBy, WebsiteCategory, WebsiteFilters};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResponse, ApiResult};
use crate::server::middleware::{MaybeUser, RequireUser};

/// Gallery query string
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWebsitesParams {
    pub search: Option<String>,
    /// A category value, or `all`
    pub category: Option<String>,
    pub is_popular: Option<bool>,
    pub sort_by: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListWebsitesParams {
    pub fn into_listing(self) -> Result<(WebsiteFilters, SortBy, PageArgs), ApiError> {
        let category = parse_category_filter(self.category.as_deref())?;
        let sort = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => SortBy::default(),
            Some(raw) => raw
                .parse()
                .map_err(|_| ApiError::BadRequest(format!("Unknown sort option: {raw}")))?,
        };

        let filters = WebsiteFilters {
            search: normalize_term(self.search.as_deref()),
            category,
            is_popular: self.is_popular,
            ..WebsiteFilters::public()
        };
        let args = PageArgs::new(self.limit, self.offset, GALLERY_PAGE_SIZE);
        Ok((filters, sort, args))
    }
}

/// `all` and blank mean no category filter
pub fn parse_category_filter(raw: Option<&str>) -> Result<Option<WebsiteCategory>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("Unknown category: {raw}"))),
    }
}

/// GET /api/websites
pub async fn list_websites(
    State(state): State<AppState>,
    Query(params): Query<ListWebsitesParams>,
) -> ApiResult<WebsiteListData> {
    let (filters, sort, args) = params.into_listing()?;
    let list = actions::list_websites(filters, sort, args, &state.deps).await?;
    Ok(ApiResponse::ok(list))
}

/// POST /api/websites
pub async fn submit_website(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(input): Json<SubmitWebsiteInput>,
) -> ApiResult<WebsiteData> {
    let website = actions::submit_website(user.actor(), input, &state.deps).await?;
    Ok(ApiResponse::ok(website))
}

/// GET /api/websites/{id}
pub async fn get_website(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<WebsiteId>,
) -> ApiResult<Option<WebsiteDetailsData>> {
    let viewer = user.map(|u| u.actor());
    let website = actions::get_website(id, viewer, &state.deps).await?;
    Ok(ApiResponse::ok(website))
}

/// POST /api/websites/{id}/view
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<WebsiteId>,
) -> ApiResult<ViewData> {
    let views = actions::record_view(id, &state.deps)
        .await?
        .ok_or(ApiError::NotFound("Website"))?;
    Ok(ApiResponse::ok(views))
}

/// POST /api/websites/{id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<WebsiteId>,
) -> ApiResult<LikeData> {
    let like = actions::toggle_like(user.actor(), id, &state.deps)
        .await?
        .ok_or(ApiError::NotFound("Website"))?;
    Ok(ApiResponse::ok(like))
}

/// GET /api/websites/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<WebsiteId>,
) -> ApiResult<Option<Vec<CommentData>>> {
    let comments = actions::list_comments(id, &state.deps).await?;
    Ok(ApiResponse::ok(comments))
}

/// POST /api/websites/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<WebsiteId>,
    Json(input): Json<CommentInput>,
) -> ApiResult<CommentData> {
    let comment = actions::add_comment(&user.user, id, input, &state.deps)
        .await?
        .ok_or(ApiError::NotFound("Website"))?;
    Ok(ApiResponse::ok(comment))
}
