use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::gallery::handlers;
use crate::features::gallery::services::GalleryStore;

/// Create routes for the gallery feature
pub fn routes(store: Arc<dyn GalleryStore>) -> Router {
    Router::new()
        .route(
            "/gallery",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/gallery/{id}",
            get(handlers::get_entry)
                .put(handlers::update_entry)
                .delete(handlers::delete_entry),
        )
        .route("/gallery/{id}/active", patch(handlers::set_entry_active))
        .with_state(store)
}
