mod gallery_store;
mod pg_gallery_store;

pub use gallery_store::GalleryStore;
pub use pg_gallery_store::PgGalleryStore;
