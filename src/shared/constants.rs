/// Default page size for gallery listings
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// UPLOAD CONSTANTS
// =============================================================================

/// Media types accepted by the upload endpoint
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Maximum upload size in bytes (10MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Extra body allowance for multipart boundaries and part headers
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// URL prefix under which the content directory is served
pub const UPLOADS_PATH: &str = "/uploads";

/// Check if an image media type is accepted for upload
pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}
