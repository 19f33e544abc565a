use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::features::uploads::handlers::upload_image;
use crate::features::uploads::services::UploadService;
use crate::shared::constants::{MULTIPART_OVERHEAD, UPLOADS_PATH};

/// Create routes for the uploads feature: the upload endpoint plus static
/// serving of the content directory
pub fn routes(upload_service: Arc<UploadService>) -> Router {
    let body_limit = upload_service.max_file_size() + MULTIPART_OVERHEAD;
    let content_dir = ServeDir::new(upload_service.dir());

    Router::new()
        .route(
            "/upload",
            // The service enforces the exact file limit while streaming
            post(upload_image).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(upload_service)
        .nest_service(UPLOADS_PATH, content_dir)
}
