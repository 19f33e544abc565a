use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::gallery::dtos::{
    CreateGalleryDto, GalleryEntryDto, ListGalleryQuery, SetActiveDto, UpdateGalleryDto,
};
use crate::features::gallery::services::GalleryStore;
use crate::shared::types::{ErrorResponse, Paginated};

/// List gallery entries (paginated, newest first)
#[utoipa::path(
    get,
    path = "/gallery",
    params(ListGalleryQuery),
    responses(
        (status = 200, description = "One page of gallery entries", body = Paginated<GalleryEntryDto>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "gallery"
)]
pub async fn list_entries(
    State(store): State<Arc<dyn GalleryStore>>,
    AppQuery(query): AppQuery<ListGalleryQuery>,
) -> Result<Json<Paginated<GalleryEntryDto>>> {
    let page = store.list(query.page_request(), query.status).await?;
    Ok(Json(page.map(GalleryEntryDto::from)))
}

/// Get a gallery entry by ID
#[utoipa::path(
    get,
    path = "/gallery/{id}",
    params(
        ("id" = i64, Path, description = "Gallery entry ID")
    ),
    responses(
        (status = 200, description = "Entry found", body = GalleryEntryDto),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    tag = "gallery"
)]
pub async fn get_entry(
    State(store): State<Arc<dyn GalleryStore>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<GalleryEntryDto>> {
    let entry = store.get_by_id(id).await?;
    Ok(Json(entry.into()))
}

/// Create a gallery entry
#[utoipa::path(
    post,
    path = "/gallery",
    request_body = CreateGalleryDto,
    responses(
        (status = 201, description = "Entry created", body = GalleryEntryDto),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "gallery"
)]
pub async fn create_entry(
    State(store): State<Arc<dyn GalleryStore>>,
    AppJson(dto): AppJson<CreateGalleryDto>,
) -> Result<(StatusCode, Json<GalleryEntryDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = store.create(&dto.title, &dto.image_url).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Replace an entry's title and image URL
#[utoipa::path(
    put,
    path = "/gallery/{id}",
    params(
        ("id" = i64, Path, description = "Gallery entry ID")
    ),
    request_body = UpdateGalleryDto,
    responses(
        (status = 200, description = "Entry updated", body = GalleryEntryDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    tag = "gallery"
)]
pub async fn update_entry(
    State(store): State<Arc<dyn GalleryStore>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateGalleryDto>,
) -> Result<Json<GalleryEntryDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = store.update(id, &dto.title, &dto.image_url).await?;
    Ok(Json(entry.into()))
}

/// Set an entry's active flag
#[utoipa::path(
    patch,
    path = "/gallery/{id}/active",
    params(
        ("id" = i64, Path, description = "Gallery entry ID")
    ),
    request_body = SetActiveDto,
    responses(
        (status = 200, description = "Active flag updated", body = GalleryEntryDto),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    tag = "gallery"
)]
pub async fn set_entry_active(
    State(store): State<Arc<dyn GalleryStore>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<SetActiveDto>,
) -> Result<Json<GalleryEntryDto>> {
    let entry = store.set_active(id, dto.active).await?;
    Ok(Json(entry.into()))
}

/// Delete an entry permanently
#[utoipa::path(
    delete,
    path = "/gallery/{id}",
    params(
        ("id" = i64, Path, description = "Gallery entry ID")
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    tag = "gallery"
)]
pub async fn delete_entry(
    State(store): State<Arc<dyn GalleryStore>>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
