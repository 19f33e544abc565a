//! Typed HTTP client for the gallery API plus the presentational state a
//! gallery screen keeps between calls.

mod browser;
mod error;
mod gallery_client;

pub use browser::{GalleryBrowser, Modal};
pub use error::ClientError;
pub use gallery_client::GalleryClient;
