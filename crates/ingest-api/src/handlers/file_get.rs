use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use ingest_core::{AppError, FileMetadata, PageRequest};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    params(PageRequest),
    responses(
        (status = 200, description = "Page of file metadata, newest first", body = Vec<FileMetadata>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 401, description = "Missing API key", body = ErrorResponse),
        (status = 403, description = "Invalid API key", body = ErrorResponse)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Vec<FileMetadata>>, HttpAppError> {
    let Query(page_request) = query?;
    let (page, page_size) = page_request.normalized();

    let records = state.files.list_metadata(page, page_size).await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "Metadata record ID")
    ),
    responses(
        (status = 200, description = "File metadata", body = FileMetadata),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 401, description = "Missing API key", body = ErrorResponse),
        (status = 403, description = "Invalid API key", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_file"))]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FileMetadata>, HttpAppError> {
    match state.files.get_metadata(&id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(AppError::NotFound("File not found".to_string()).into()),
    }
}
