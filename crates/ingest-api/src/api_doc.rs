//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use ingest_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ingest API",
        version = "0.1.0",
        description = "File ingestion API: upload blobs, then list, fetch and delete their metadata. File routes require the X-API-KEY header when the server has an API key configured."
    ),
    paths(
        handlers::file_upload::upload_file,
        handlers::file_get::list_files,
        handlers::file_get::get_file,
        handlers::file_delete::delete_file,
    ),
    components(
        schemas(
            models::FileMetadata,
            models::UploadOutcome,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "File upload and metadata operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_file_routes() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/files"));
        assert!(spec.paths.paths.contains_key("/files/{id}"));
    }
}
