//! Submission and comment input, validated with `validator`

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use url::Url;
use validator::{Validate, ValidationError};

use crate::domains::website::models::{NewWebsite, WebsiteCategory};

pub const MAX_TAGS: usize = 10;
pub const MAX_TAG_CHARS: usize = 20;

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];
const IMAGE_HOSTS: [&str; 2] = ["unsplash.com", "imgur.com"];

lazy_static! {
    // Letters, digits, whitespace and - _ . ( ) &
    static ref TITLE_CHARS: Regex =
        Regex::new(r"^[A-Za-z0-9\s\-_.()&]+$").expect("title pattern is a valid regex");
}

/// Website submission form
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWebsiteInput {
    #[validate(length(min = 3, max = 100, message = "Title must be between 3 and 100 characters"))]
    #[validate(regex(
        path = *TITLE_CHARS,
        message = "Title can only contain letters, numbers, spaces, and basic punctuation"
    ))]
    pub title: String,

    #[validate(length(
        min = 20,
        max = 500,
        message = "Description must be between 20 and 500 characters"
    ))]
    pub description: String,

    #[validate(custom(function = "validate_http_url", message = "Live URL must be a valid URL"))]
    pub live_url: String,

    #[serde(default)]
    #[validate(custom(function = "validate_http_url", message = "Source URL must be a valid URL"))]
    pub source_url: Option<String>,

    #[validate(custom(function = "validate_image_url"))]
    pub image_url: String,

    #[validate(custom(function = "validate_category"))]
    pub category: String,

    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,
}

impl SubmitWebsiteInput {
    /// Trim every field; a blank source URL counts as absent.
    pub fn normalize(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            live_url: self.live_url.trim().to_string(),
            source_url: self
                .source_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            image_url: self.image_url.trim().to_string(),
            category: self.category.trim().to_string(),
            tags: self.tags.iter().map(|t| t.trim().to_string()).collect(),
        }
    }

    /// Convert validated input into model fields.
    pub fn into_new_website(self) -> Result<NewWebsite, ValidationError> {
        let category = parse_category(&self.category)?;
        Ok(NewWebsite {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            source_url: self.source_url,
            live_url: self.live_url,
            tags: self.tags,
            category,
        })
    }
}

/// New comment body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentInput {
    #[validate(custom(function = "validate_comment"))]
    pub content: String,
}

impl CommentInput {
    pub fn normalize(self) -> Self {
        Self {
            content: self.content.trim().to_string(),
        }
    }
}

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn parse_http_url(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
}

fn validate_http_url(raw: &str) -> Result<(), ValidationError> {
    parse_http_url(raw)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("url"))
}

fn validate_image_url(raw: &str) -> Result<(), ValidationError> {
    let url = parse_http_url(raw).ok_or_else(|| error("url", "Image URL must be a valid URL"))?;

    let path = url.path().to_ascii_lowercase();
    let has_image_extension = IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext));
    let is_image_host = url
        .host_str()
        .map(|host| IMAGE_HOSTS.iter().any(|known| host.contains(known)))
        .unwrap_or(false);

    if has_image_extension || is_image_host {
        Ok(())
    } else {
        Err(error(
            "image_url",
            "Image URL must point to an image file or a supported image host",
        ))
    }
}

fn parse_category(raw: &str) -> Result<WebsiteCategory, ValidationError> {
    raw.parse::<WebsiteCategory>()
        .map_err(|_| error("category", "Please select a valid category"))
}

fn validate_category(raw: &str) -> Result<(), ValidationError> {
    parse_category(raw).map(|_| ())
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.is_empty() {
        return Err(error("tags", "At least one tag is required"));
    }
    if tags.len() > MAX_TAGS {
        return Err(error("tags", "Maximum 10 tags allowed"));
    }
    if tags
        .iter()
        .any(|t| t.is_empty() || t.chars().count() > MAX_TAG_CHARS)
    {
        return Err(error("tags", "Each tag must be between 1 and 20 characters"));
    }

    let mut seen = std::collections::HashSet::with_capacity(tags.len());
    if !tags.iter().all(|t| seen.insert(t.to_lowercase())) {
        return Err(error("tags", "Tags must be unique"));
    }
    Ok(())
}

fn validate_comment(content: &str) -> Result<(), ValidationError> {
    let len = content.trim().chars().count();
    if len == 0 {
        return Err(error("content", "Comment cannot be empty"));
    }
    if len > 1000 {
        return Err(error("content", "Comment must be at most 1000 characters"));
    }
    Ok(())
}
