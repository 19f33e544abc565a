use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a gallery entry
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct GalleryEntry {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
