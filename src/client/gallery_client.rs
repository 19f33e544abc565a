use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use crate::client::ClientError;
use crate::features::gallery::dtos::{
    CreateGalleryDto, GalleryEntryDto, ListGalleryQuery, SetActiveDto, StatusFilter,
    UpdateGalleryDto,
};
use crate::features::uploads::dtos::UploadResponseDto;
use crate::shared::constants::{is_image_type_allowed, ALLOWED_IMAGE_TYPES, MAX_UPLOAD_SIZE};
use crate::shared::types::{ErrorResponse, Paginated};

type Result<T> = std::result::Result<T, ClientError>;

/// HTTP client for the gallery API
#[derive(Debug, Clone)]
pub struct GalleryClient {
    http: Client,
    base_url: String,
}

impl GalleryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload one image. Type and size are checked before anything is sent.
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponseDto> {
        if !is_image_type_allowed(content_type) {
            return Err(ClientError::Validation(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }
        if bytes.len() > MAX_UPLOAD_SIZE {
            return Err(ClientError::Validation(format!(
                "File too large. Maximum size is {} MB",
                MAX_UPLOAD_SIZE / 1024 / 1024
            )));
        }

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn list(&self, query: &ListGalleryQuery) -> Result<Paginated<GalleryEntryDto>> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if query.status != StatusFilter::All {
            params.push(("status", query.status.as_str().to_string()));
        }

        let response = self
            .http
            .get(self.url("/gallery"))
            .query(&params)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get(&self, id: i64) -> Result<GalleryEntryDto> {
        let response = self
            .http
            .get(self.url(&format!("/gallery/{}", id)))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create(&self, dto: &CreateGalleryDto) -> Result<GalleryEntryDto> {
        dto.validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        let response = self
            .http
            .post(self.url("/gallery"))
            .json(dto)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update(&self, id: i64, dto: &UpdateGalleryDto) -> Result<GalleryEntryDto> {
        dto.validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        let response = self
            .http
            .put(self.url(&format!("/gallery/{}", id)))
            .json(dto)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn set_active(&self, id: i64, active: bool) -> Result<GalleryEntryDto> {
        let response = self
            .http
            .patch(self.url(&format!("/gallery/{}/active", id)))
            .json(&SetActiveDto { active })
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/gallery/{}", id)))
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(api_error(response).await)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    if response.status().is_success() {
        return Ok(response.json::<T>().await?);
    }
    Err(api_error(response).await)
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(e) => {
            debug!("Error response without JSON body: {}", e);
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        }
    };

    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
