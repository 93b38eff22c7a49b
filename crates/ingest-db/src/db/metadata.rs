use ingest_core::{AppError, FileMetadata, MetadataBackend};

/// Trait for metadata document store operations
///
/// Records are keyed by `FileMetadata::id`. Listings are 1-indexed and ordered
/// by `created_at` descending, ties broken by `id` ascending.
#[async_trait::async_trait]
pub trait MetadataRepository: Send + Sync {
    /// Persist the record and return its id.
    ///
    /// A record with an empty id is assigned a fresh UUID v4 first. An id
    /// that is already stored is rejected and the stored record is kept.
    async fn create_metadata(&self, record: FileMetadata) -> Result<String, AppError>;

    /// Fetch a record; `None` when absent.
    async fn get_metadata(&self, id: &str) -> Result<Option<FileMetadata>, AppError>;

    /// One page of records. `page <= 0` is treated as 1, `page_size <= 0` as 50.
    async fn list_metadata(&self, page: i64, page_size: i64)
        -> Result<Vec<FileMetadata>, AppError>;

    /// Remove a record. Removing an absent id succeeds.
    async fn delete_metadata(&self, id: &str) -> Result<(), AppError>;

    fn backend_type(&self) -> MetadataBackend;
}

/// Give the record an id if it arrived without one.
pub(crate) fn ensure_id(mut record: FileMetadata) -> FileMetadata {
    if record.id.trim().is_empty() {
        record.id = uuid::Uuid::new_v4().to_string();
    }
    record
}
