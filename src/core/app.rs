use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};

use crate::features::gallery::{self, GalleryStore};
use crate::features::uploads::{self, UploadService};

/// Simple health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Application routes without the outer CORS/tracing layers
pub fn app_router(store: Arc<dyn GalleryStore>, upload_service: Arc<UploadService>) -> Router {
    Router::new()
        .merge(uploads::routes(upload_service))
        .merge(gallery::routes(store))
        .route("/health", get(health_check))
}
