use tracing::debug;

use crate::client::{ClientError, GalleryClient};
use crate::features::gallery::dtos::{
    CreateGalleryDto, GalleryEntryDto, ListGalleryQuery, StatusFilter, UpdateGalleryDto,
};
use crate::features::uploads::dtos::UploadResponseDto;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::Pagination;

type Result<T> = std::result::Result<T, ClientError>;

/// Which form is currently shown over the list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Add,
    Edit(GalleryEntryDto),
}

/// State behind a gallery screen: filter, page, the loaded slice and the open modal.
///
/// Failed calls leave the loaded state untouched. Successful mutations
/// re-fetch the current page instead of patching `items` locally.
#[derive(Debug)]
pub struct GalleryBrowser {
    client: GalleryClient,
    filter: StatusFilter,
    page: i64,
    limit: i64,
    items: Vec<GalleryEntryDto>,
    pagination: Option<Pagination>,
    modal: Modal,
}

impl GalleryBrowser {
    pub fn new(client: GalleryClient) -> Self {
        Self {
            client,
            filter: StatusFilter::All,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            items: Vec::new(),
            pagination: None,
            modal: Modal::Closed,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn items(&self) -> &[GalleryEntryDto] {
        &self.items
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Load the current page. A page past the end (after deletes or a
    /// toggle under a filter) falls back to the last non-empty page.
    pub async fn refresh(&mut self) -> Result<()> {
        let mut result = self.client.list(&self.query()).await?;

        let total_pages = result.pagination.total_pages;
        if result.items.is_empty() && self.page > 1 && total_pages > 0 {
            debug!(
                "Page {} is empty, falling back to page {}",
                self.page, total_pages
            );
            self.page = total_pages;
            result = self.client.list(&self.query()).await?;
        }

        self.page = result.pagination.page;
        self.items = result.items;
        self.pagination = Some(result.pagination);
        Ok(())
    }

    pub async fn set_filter(&mut self, filter: StatusFilter) -> Result<()> {
        self.filter = filter;
        self.page = 1;
        self.refresh().await
    }

    pub async fn go_to_page(&mut self, page: i64) -> Result<()> {
        self.page = page.max(1);
        self.refresh().await
    }

    pub fn open_add_modal(&mut self) {
        self.modal = Modal::Add;
    }

    pub fn open_edit_modal(&mut self, entry: GalleryEntryDto) {
        self.modal = Modal::Edit(entry);
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Upload a file for the form currently open; the returned URL goes into
    /// the next `submit_add` or `submit_edit`.
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponseDto> {
        self.client.upload(file_name, content_type, bytes).await
    }

    pub async fn submit_add(&mut self, title: &str, image_url: &str) -> Result<GalleryEntryDto> {
        let dto = CreateGalleryDto {
            title: title.to_string(),
            image_url: image_url.to_string(),
        };
        let created = self.client.create(&dto).await?;

        self.modal = Modal::Closed;
        self.refresh().await?;
        Ok(created)
    }

    /// Save the entry open in the edit modal
    pub async fn submit_edit(&mut self, title: &str, image_url: &str) -> Result<GalleryEntryDto> {
        let Modal::Edit(entry) = &self.modal else {
            return Err(ClientError::Validation(
                "No entry is being edited".to_string(),
            ));
        };

        let dto = UpdateGalleryDto {
            title: title.to_string(),
            image_url: image_url.to_string(),
        };
        let updated = self.client.update(entry.id, &dto).await?;

        self.modal = Modal::Closed;
        self.refresh().await?;
        Ok(updated)
    }

    pub async fn toggle_active(&mut self, entry: &GalleryEntryDto) -> Result<GalleryEntryDto> {
        let updated = self.client.set_active(entry.id, !entry.active).await?;
        self.refresh().await?;
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.client.delete(id).await?;
        if matches!(&self.modal, Modal::Edit(entry) if entry.id == id) {
            self.modal = Modal::Closed;
        }
        self.refresh().await
    }

    fn query(&self) -> ListGalleryQuery {
        ListGalleryQuery {
            page: self.page,
            limit: self.limit,
            status: self.filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{test_app, TestApp};

    /// Serve the in-memory app on an ephemeral port
    async fn live_client() -> (GalleryClient, TestApp) {
        let app = test_app().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = app.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (GalleryClient::new(format!("http://{}", addr)), app)
    }

    async fn seed(client: &GalleryClient, n: usize) -> Vec<GalleryEntryDto> {
        let mut created = Vec::new();
        for i in 0..n {
            let dto = CreateGalleryDto {
                title: format!("Entry {i}"),
                image_url: format!("https://cdn.example.com/{i}.png"),
            };
            created.push(client.create(&dto).await.unwrap());
        }
        created
    }

    #[tokio::test]
    async fn test_client_crud_round_trip() {
        let (client, _app) = live_client().await;

        let created = client
            .create(&CreateGalleryDto {
                title: "Sunset".to_string(),
                image_url: "https://cdn.example.com/sunset.jpg".to_string(),
            })
            .await
            .unwrap();
        assert!(created.active);

        let fetched = client.get(created.id).await.unwrap();
        assert_eq!(fetched, created);

        let toggled = client.set_active(created.id, false).await.unwrap();
        assert!(!toggled.active);

        client.delete(created.id).await.unwrap();
        let err = client.get(created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_client_validates_before_sending() {
        let (client, app) = live_client().await;

        let err = client
            .create(&CreateGalleryDto {
                title: "x".repeat(101),
                image_url: "https://cdn.example.com/a.png".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        let err = client
            .upload("notes.txt", "text/plain", b"hello".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        let page = client.list(&ListGalleryQuery::default()).await.unwrap();
        assert_eq!(page.pagination.total, 0);
        assert_eq!(std::fs::read_dir(app.upload_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_client_surfaces_api_errors() {
        let (client, _app) = live_client().await;

        let err = client
            .update(
                42,
                &UpdateGalleryDto {
                    title: "Missing".to_string(),
                    image_url: "https://cdn.example.com/m.png".to_string(),
                },
            )
            .await
            .unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Gallery entry 42 not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_browser_upload_then_add() {
        let (client, _app) = live_client().await;
        let mut browser = GalleryBrowser::new(client);

        browser.open_add_modal();
        assert_eq!(browser.modal(), &Modal::Add);

        let upload = browser
            .upload_image("cat.png", "image/png", vec![7u8; 256])
            .await
            .unwrap();
        assert_eq!(upload.size, 256);

        let created = browser.submit_add("Cat", &upload.image_url).await.unwrap();

        assert_eq!(browser.modal(), &Modal::Closed);
        assert_eq!(browser.items().len(), 1);
        assert_eq!(browser.items()[0].id, created.id);
        assert_eq!(browser.items()[0].image_url, upload.image_url);
    }

    #[tokio::test]
    async fn test_browser_filter_resets_page() {
        let (client, _app) = live_client().await;
        let created = seed(&client, 5).await;
        client.set_active(created[0].id, false).await.unwrap();

        let mut browser = GalleryBrowser::new(client).with_limit(2);
        browser.go_to_page(3).await.unwrap();
        assert_eq!(browser.page(), 3);
        assert_eq!(browser.items().len(), 1);

        browser.set_filter(StatusFilter::Inactive).await.unwrap();
        assert_eq!(browser.page(), 1);
        assert_eq!(browser.items().len(), 1);
        assert_eq!(browser.items()[0].id, created[0].id);
        assert_eq!(browser.pagination().unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_browser_edit_and_toggle_refetch() {
        let (client, _app) = live_client().await;
        seed(&client, 1).await;

        let mut browser = GalleryBrowser::new(client);
        browser.refresh().await.unwrap();
        let entry = browser.items()[0].clone();

        browser.open_edit_modal(entry.clone());
        browser
            .submit_edit("Renamed", "https://cdn.example.com/new.png")
            .await
            .unwrap();
        assert_eq!(browser.modal(), &Modal::Closed);
        assert_eq!(browser.items()[0].title, "Renamed");

        let current = browser.items()[0].clone();
        browser.toggle_active(&current).await.unwrap();
        assert!(!browser.items()[0].active);

        browser.set_filter(StatusFilter::Active).await.unwrap();
        assert!(browser.items().is_empty());
    }

    #[tokio::test]
    async fn test_submit_edit_without_open_entry() {
        let (client, _app) = live_client().await;
        let mut browser = GalleryBrowser::new(client);

        let err = browser
            .submit_edit("Title", "https://cdn.example.com/x.png")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_last_item_falls_back_a_page() {
        let (client, _app) = live_client().await;
        let created = seed(&client, 3).await;

        let mut browser = GalleryBrowser::new(client).with_limit(2);
        browser.go_to_page(2).await.unwrap();
        assert_eq!(browser.items().len(), 1);
        let oldest = browser.items()[0].id;
        assert_eq!(oldest, created[0].id);

        browser.delete(oldest).await.unwrap();

        assert_eq!(browser.page(), 1);
        assert_eq!(browser.items().len(), 2);
        assert_eq!(browser.pagination().unwrap().total, 2);
    }
}
