//! Image uploads streamed to the content directory.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/upload` | Store one image, return its public URL |
//! | GET | `/uploads/{filename}` | Serve a stored image |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::UploadService;
