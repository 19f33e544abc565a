use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::gallery::dtos::StatusFilter;
use crate::features::gallery::models::GalleryEntry;
use crate::shared::types::{PageRequest, Paginated};

/// Persistence gateway for gallery entries.
///
/// Each call is one independently atomic store action. Missing ids surface as
/// `AppError::NotFound`; concurrent writes to the same id are last-write-wins.
#[async_trait]
pub trait GalleryStore: Send + Sync {
    /// Insert a new entry. `active` starts as `true`.
    async fn create(&self, title: &str, image_url: &str) -> Result<GalleryEntry>;

    async fn get_by_id(&self, id: i64) -> Result<GalleryEntry>;

    /// One page of entries, newest first, with `total` counted over the same filter
    async fn list(&self, page: PageRequest, filter: StatusFilter)
        -> Result<Paginated<GalleryEntry>>;

    /// Replace both text fields, leaving `active` and `created_at` untouched
    async fn update(&self, id: i64, title: &str, image_url: &str) -> Result<GalleryEntry>;

    async fn set_active(&self, id: i64, active: bool) -> Result<GalleryEntry>;

    /// Hard delete
    async fn delete(&self, id: i64) -> Result<()>;
}
