//! Gallery entries: title, image URL and an active flag.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/gallery?page=&limit=&status=` | Paginated listing, newest first |
//! | GET | `/gallery/{id}` | Single entry |
//! | POST | `/gallery` | Create entry |
//! | PUT | `/gallery/{id}` | Replace title and image URL |
//! | PATCH | `/gallery/{id}/active` | Set active flag |
//! | DELETE | `/gallery/{id}` | Hard delete |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{GalleryStore, PgGalleryStore};
