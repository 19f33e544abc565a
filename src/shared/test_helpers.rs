use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use tempfile::TempDir;

use crate::core::app::app_router;
use crate::core::error::{AppError, Result};
use crate::features::gallery::dtos::StatusFilter;
use crate::features::gallery::models::GalleryEntry;
use crate::features::gallery::GalleryStore;
use crate::features::uploads::UploadService;
use crate::shared::constants::MAX_UPLOAD_SIZE;
use crate::shared::types::{PageRequest, Paginated, Pagination};

pub const TEST_BASE_URL: &str = "http://localhost:3001";

/// In-memory [`GalleryStore`] with the same ordering and not-found rules as PostgreSQL
#[derive(Default)]
pub struct InMemoryGalleryStore {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    last_timestamp: Option<DateTime<Utc>>,
    rows: Vec<GalleryEntry>,
}

impl State {
    /// Strictly increasing clock so ordering by creation time is deterministic
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }

    fn find_mut(&mut self, id: i64) -> Result<&mut GalleryEntry> {
        self.rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Gallery entry {} not found", id)))
    }
}

#[async_trait]
impl GalleryStore for InMemoryGalleryStore {
    async fn create(&self, title: &str, image_url: &str) -> Result<GalleryEntry> {
        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let now = state.tick();
        let entry = GalleryEntry {
            id: state.next_id,
            title: title.to_string(),
            image_url: image_url.to_string(),
            active: true,
            created_at: now,
            updated_at: now,
        };
        state.rows.push(entry.clone());
        Ok(entry)
    }

    async fn get_by_id(&self, id: i64) -> Result<GalleryEntry> {
        let mut state = self.inner.lock().unwrap();
        state.find_mut(id).map(|e| e.clone())
    }

    async fn list(
        &self,
        page: PageRequest,
        filter: StatusFilter,
    ) -> Result<Paginated<GalleryEntry>> {
        let state = self.inner.lock().unwrap();
        let mut matching: Vec<GalleryEntry> = state
            .rows
            .iter()
            .filter(|e| filter.matches(e.active))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();

        Ok(Paginated {
            items,
            pagination: Pagination::new(page, total),
        })
    }

    async fn update(&self, id: i64, title: &str, image_url: &str) -> Result<GalleryEntry> {
        let mut state = self.inner.lock().unwrap();
        let now = state.tick();
        let entry = state.find_mut(id)?;
        entry.title = title.to_string();
        entry.image_url = image_url.to_string();
        entry.updated_at = now;
        Ok(entry.clone())
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<GalleryEntry> {
        let mut state = self.inner.lock().unwrap();
        let now = state.tick();
        let entry = state.find_mut(id)?;
        entry.active = active;
        entry.updated_at = now;
        Ok(entry.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        let before = state.rows.len();
        state.rows.retain(|e| e.id != id);
        if state.rows.len() == before {
            return Err(AppError::NotFound(format!("Gallery entry {} not found", id)));
        }
        Ok(())
    }
}

/// Full application router over an in-memory store and a temporary content directory
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryGalleryStore>,
    pub upload_dir: TempDir,
}

pub async fn test_app() -> TestApp {
    let upload_dir = TempDir::new().unwrap();
    let store = Arc::new(InMemoryGalleryStore::default());
    let upload_service = Arc::new(
        UploadService::new(upload_dir.path(), TEST_BASE_URL, MAX_UPLOAD_SIZE)
            .await
            .unwrap(),
    );

    let router = app_router(store.clone(), upload_service);

    TestApp {
        router,
        store,
        upload_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_orders_newest_first() {
        let store = InMemoryGalleryStore::default();
        for i in 0..3 {
            store.create(&format!("t{i}"), "u").await.unwrap();
        }

        let page = store
            .list(PageRequest::new(1, 12), StatusFilter::All)
            .await
            .unwrap();
        let ids: Vec<i64> = page.items.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
