use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upload image request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler streams axum's Multipart fields directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image to upload (jpeg, png, gif or webp, max 10MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Response DTO for a stored upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDto {
    pub success: bool,
    /// Absolute public URL of the stored file
    #[schema(example = "http://localhost:3001/uploads/1718000000000-k3x9a.jpg")]
    pub image_url: String,
    /// Generated name of the stored file
    pub filename: String,
    /// Filename as sent by the client
    pub original_name: String,
    /// Bytes written to disk
    pub size: u64,
}
