use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::gallery::dtos::StatusFilter;
use crate::features::gallery::models::GalleryEntry;
use crate::features::gallery::services::GalleryStore;
use crate::shared::types::{PageRequest, Paginated, Pagination};

/// PostgreSQL-backed gallery store
pub struct PgGalleryStore {
    pool: PgPool,
}

impl PgGalleryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Gallery entry {} not found", id))
}

#[async_trait]
impl GalleryStore for PgGalleryStore {
    async fn create(&self, title: &str, image_url: &str) -> Result<GalleryEntry> {
        let entry = sqlx::query_as::<_, GalleryEntry>(
            r#"
            INSERT INTO gallery (title, image_url)
            VALUES ($1, $2)
            RETURNING id, title, image_url, active, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create gallery entry: {:?}", e);
            AppError::Database(e)
        })?;

        info!("Gallery entry created: id={}", entry.id);
        Ok(entry)
    }

    async fn get_by_id(&self, id: i64) -> Result<GalleryEntry> {
        let entry = sqlx::query_as::<_, GalleryEntry>(
            r#"
            SELECT id, title, image_url, active, created_at, updated_at
            FROM gallery
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        entry.ok_or_else(|| not_found(id))
    }

    async fn list(
        &self,
        page: PageRequest,
        filter: StatusFilter,
    ) -> Result<Paginated<GalleryEntry>> {
        let active = filter.as_active();

        let items_query = sqlx::query_as::<_, GalleryEntry>(
            r#"
            SELECT id, title, image_url, active, created_at, updated_at
            FROM gallery
            WHERE ($1::BOOLEAN IS NULL OR active = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(active)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool);

        let count_query = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM gallery
            WHERE ($1::BOOLEAN IS NULL OR active = $1)
            "#,
        )
        .bind(active)
        .fetch_one(&self.pool);

        let (items, total) = tokio::try_join!(items_query, count_query).map_err(|e| {
            tracing::error!("Failed to list gallery entries: {:?}", e);
            AppError::Database(e)
        })?;

        debug!(
            "Listed gallery entries: page={}, limit={}, status={}, returned={}, total={}",
            page.page,
            page.limit,
            filter.as_str(),
            items.len(),
            total
        );

        Ok(Paginated {
            items,
            pagination: Pagination::new(page, total),
        })
    }

    async fn update(&self, id: i64, title: &str, image_url: &str) -> Result<GalleryEntry> {
        let entry = sqlx::query_as::<_, GalleryEntry>(
            r#"
            UPDATE gallery
            SET title = $2, image_url = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, image_url, active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;

        info!("Gallery entry updated: id={}", entry.id);
        Ok(entry)
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<GalleryEntry> {
        let entry = sqlx::query_as::<_, GalleryEntry>(
            r#"
            UPDATE gallery
            SET active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, image_url, active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;

        info!("Gallery entry id={} set active={}", entry.id, entry.active);
        Ok(entry)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM gallery WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        info!("Gallery entry deleted: id={}", id);
        Ok(())
    }
}

/// Run against a real database with `DATABASE_URL` set and `cargo test -- --ignored`
#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: i64, limit: i64) -> PageRequest {
        PageRequest::new(page, limit)
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_defaults_to_active(pool: PgPool) {
        let store = PgGalleryStore::new(pool);

        let entry = store.create("Harbour", "https://cdn.example.com/h.jpg").await.unwrap();
        assert!(entry.active);
        assert_eq!(entry.created_at, entry.updated_at);

        let fetched = store.get_by_id(entry.id).await.unwrap();
        assert_eq!(fetched, entry);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_list_orders_newest_first_with_id_tie_break(pool: PgPool) {
        // Rows inserted by one statement share NOW()
        sqlx::query(
            "INSERT INTO gallery (title, image_url) VALUES ('a', 'u'), ('b', 'u'), ('c', 'u')",
        )
        .execute(&pool)
        .await
        .unwrap();
        let store = PgGalleryStore::new(pool);
        let newest = store.create("d", "u").await.unwrap();

        let result = store.list(page(1, 12), StatusFilter::All).await.unwrap();
        let titles: Vec<&str> = result.items.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["d", "c", "b", "a"]);
        assert_eq!(result.items[0].id, newest.id);
        assert_eq!(result.pagination.total, 4);

        let second = store.list(page(2, 3), StatusFilter::All).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].title, "a");
        assert_eq!(second.pagination.total_pages, 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_list_status_filter(pool: PgPool) {
        let store = PgGalleryStore::new(pool);
        let shown = store.create("shown", "u1").await.unwrap();
        let hidden = store.create("hidden", "u2").await.unwrap();
        store.set_active(hidden.id, false).await.unwrap();

        let active = store.list(page(1, 12), StatusFilter::Active).await.unwrap();
        assert_eq!(active.pagination.total, 1);
        assert_eq!(active.items[0].id, shown.id);

        let inactive = store.list(page(1, 12), StatusFilter::Inactive).await.unwrap();
        assert_eq!(inactive.pagination.total, 1);
        assert_eq!(inactive.items[0].id, hidden.id);

        let all = store.list(page(1, 12), StatusFilter::All).await.unwrap();
        assert_eq!(all.pagination.total, 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_advances_updated_at_only(pool: PgPool) {
        let store = PgGalleryStore::new(pool);
        let entry = store.create("Old", "https://cdn.example.com/old.png").await.unwrap();
        store.set_active(entry.id, false).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = store
            .update(entry.id, "New", "https://cdn.example.com/new.png")
            .await
            .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.image_url, "https://cdn.example.com/new.png");
        assert!(!updated.active);
        assert_eq!(updated.created_at, entry.created_at);
        assert!(updated.updated_at > entry.updated_at);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_missing_id_is_not_found(pool: PgPool) {
        let store = PgGalleryStore::new(pool);

        assert!(matches!(store.get_by_id(999).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.update(999, "t", "u").await, Err(AppError::NotFound(_))));
        assert!(matches!(store.set_active(999, true).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.delete(999).await, Err(AppError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_removes_row_and_ids_are_not_reused(pool: PgPool) {
        let store = PgGalleryStore::new(pool);
        let first = store.create("one", "u").await.unwrap();
        store.create("two", "u").await.unwrap();

        store.delete(first.id).await.unwrap();
        assert!(matches!(store.get_by_id(first.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.delete(first.id).await, Err(AppError::NotFound(_))));

        let listed = store.list(page(1, 12), StatusFilter::All).await.unwrap();
        assert_eq!(listed.pagination.total, 1);

        let third = store.create("three", "u").await.unwrap();
        assert!(third.id > first.id);
    }
}
