use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use ingest_core::constants::DEFAULT_CONTENT_TYPE;
use ingest_core::{AppError, UploadOutcome};
use std::io::Cursor;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadOutcome),
        (status = 400, description = "Not multipart, or no file field", body = ErrorResponse),
        (status = 401, description = "Missing API key", body = ErrorResponse),
        (status = 403, description = "Invalid API key", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadOutcome>, HttpAppError> {
    let mut multipart = multipart?;

    // The first field with a non-empty filename is the upload; others are ignored.
    // Browsers send `filename=""` when no file was chosen.
    while let Some(field) = multipart.next_field().await? {
        let Some(file_name) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            continue;
        };
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let data = field.bytes().await?;
        let size = i64::try_from(data.len()).unwrap_or(i64::MAX);

        tracing::debug!(
            file_name = %file_name,
            content_type = %content_type,
            size_bytes = size,
            "Received upload"
        );

        let outcome = state
            .files
            .upload(Box::pin(Cursor::new(data)), &file_name, &content_type, size)
            .await?;

        return Ok(Json(outcome));
    }

    Err(AppError::BadRequest("No file provided".to_string()).into())
}
