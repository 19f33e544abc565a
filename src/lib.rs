//! Image gallery service: streamed image uploads plus a paginated, filterable
//! store of gallery entries, and a typed client for the HTTP API.

pub mod client;
pub mod core;
pub mod features;
pub mod shared;
