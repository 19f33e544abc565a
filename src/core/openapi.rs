use utoipa::{Modify, OpenApi};

use crate::features::gallery::{dtos as gallery_dtos, handlers as gallery_handlers};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{ErrorResponse, Paginated, Pagination};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Uploads
        uploads_handlers::upload_image,
        // Gallery
        gallery_handlers::list_entries,
        gallery_handlers::get_entry,
        gallery_handlers::create_entry,
        gallery_handlers::update_entry,
        gallery_handlers::set_entry_active,
        gallery_handlers::delete_entry,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            Pagination,
            // Uploads
            uploads_dtos::UploadImageDto,
            uploads_dtos::UploadResponseDto,
            // Gallery
            gallery_dtos::StatusFilter,
            gallery_dtos::CreateGalleryDto,
            gallery_dtos::UpdateGalleryDto,
            gallery_dtos::SetActiveDto,
            gallery_dtos::GalleryEntryDto,
            Paginated<gallery_dtos::GalleryEntryDto>,
        )
    ),
    tags(
        (name = "uploads", description = "Image upload"),
        (name = "gallery", description = "Gallery entry management"),
    ),
    info(
        title = "Image Gallery API",
        version = "0.1.0",
        description = "Upload images and manage gallery entries",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_gallery_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/upload",
            "/gallery",
            "/gallery/{id}",
            "/gallery/{id}/active",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "Overridden".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("Overridden"));
    }
}
