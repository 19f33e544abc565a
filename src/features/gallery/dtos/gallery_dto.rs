use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::gallery::models::GalleryEntry;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PageRequest;

/// Which entries a listing includes, by their `active` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// No predicate on `active`
    #[default]
    All,
    /// Only entries with `active = true`
    Active,
    /// Only entries with `active = false`
    Inactive,
}

impl StatusFilter {
    /// Equality predicate on the `active` column, `None` meaning no predicate
    pub fn as_active(self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(true),
            StatusFilter::Inactive => Some(false),
        }
    }

    pub fn matches(self, active: bool) -> bool {
        match self.as_active() {
            Some(wanted) => wanted == active,
            None => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
        }
    }
}

/// Query params for listing gallery entries
#[derive(Debug, Clone, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListGalleryQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 12, max: 100)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,

    /// Filter by active flag: all (default), active or inactive
    #[serde(default)]
    pub status: StatusFilter,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListGalleryQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            status: StatusFilter::All,
        }
    }
}

impl ListGalleryQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Request DTO for creating a gallery entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryDto {
    /// Display title (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    #[schema(example = "Sunset over the bay")]
    pub title: String,

    /// Absolute URL of the image, usually returned by the upload endpoint
    #[validate(length(min = 1, max = 2048, message = "imageUrl is required"))]
    #[schema(example = "http://localhost:3001/uploads/1718000000000-k3x9a.jpg")]
    pub image_url: String,
}

/// Request DTO for replacing an entry's title and image
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryDto {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2048, message = "imageUrl is required"))]
    pub image_url: String,
}

/// Request DTO for toggling the active flag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SetActiveDto {
    pub active: bool,
}

/// Response DTO for a gallery entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntryDto {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GalleryEntry> for GalleryEntryDto {
    fn from(e: GalleryEntry) -> Self {
        Self {
            id: e.id,
            title: e.title,
            image_url: e.image_url,
            active: e.active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
