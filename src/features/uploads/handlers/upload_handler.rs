use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{UploadImageDto, UploadResponseDto};
use crate::features::uploads::services::UploadService;
use crate::shared::types::ErrorResponse;

/// Upload an image
///
/// Accepts multipart/form-data and stores the first file part. Other
/// parts before it are skipped; anything after it is ignored.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "uploads",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Multipart form with a single image file",
    ),
    responses(
        (status = 200, description = "Image stored", body = UploadResponseDto),
        (status = 400, description = "Not multipart, no file, or disallowed type", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Failed to write the file", body = ErrorResponse)
    )
)]
pub async fn upload_image(
    State(service): State<Arc<UploadService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponseDto>> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Rejected non-multipart upload: {}", e);
        AppError::BadRequest("Request must be multipart/form-data".to_string())
    })?;

    while let Some(field) = multipart.next_field().await? {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            debug!("Skipping non-file field: {:?}", field.name());
            continue;
        };

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let response = service.save(&original_name, &content_type, field).await?;
        return Ok(Json(response));
    }

    Err(AppError::BadRequest("No file sent".to_string()))
}
