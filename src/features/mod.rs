pub mod gallery;
pub mod uploads;
