use chrono::Utc;
use ingest_core::{AppError, DeleteOutcome, FileEvent, FileMetadata, UploadOutcome};
use ingest_db::MetadataRepository;
use ingest_infra::EventPublisher;
use ingest_storage::{ByteStream, FileRepository};
use std::sync::Arc;

/// Sequences blob storage, metadata persistence and event publication.
///
/// Blob upload and metadata write are not transactional: a failed write
/// leaves the blob orphaned. Event publication never changes an outcome.
#[derive(Clone)]
pub struct FileService {
    files: Arc<dyn FileRepository>,
    metadata: Option<Arc<dyn MetadataRepository>>,
    events: Arc<dyn EventPublisher>,
}

impl FileService {
    pub fn new(
        files: Arc<dyn FileRepository>,
        metadata: Option<Arc<dyn MetadataRepository>>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            files,
            metadata,
            events,
        }
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn files(&self) -> &Arc<dyn FileRepository> {
        &self.files
    }

    pub fn metadata(&self) -> Option<&Arc<dyn MetadataRepository>> {
        self.metadata.as_ref()
    }

    pub fn events(&self) -> &Arc<dyn EventPublisher> {
        &self.events
    }

    /// Store the content and, when a metadata store is wired, record it.
    #[tracing::instrument(skip(self, content), fields(file.name = %file_name, file.size = size))]
    pub async fn upload(
        &self,
        content: ByteStream,
        file_name: &str,
        content_type: &str,
        size: i64,
    ) -> Result<UploadOutcome, AppError> {
        let url = self.files.upload(content, content_type).await?;

        let metadata_id = match self.metadata {
            None => None,
            Some(ref repo) => {
                let record = FileMetadata::new(file_name, content_type, size, url.clone());
                let id = repo.create_metadata(record).await.map_err(|e| {
                    tracing::warn!(
                        error = %e,
                        url = %url,
                        "Metadata write failed after blob upload, blob is orphaned"
                    );
                    e
                })?;
                Some(id)
            }
        };

        tracing::info!(
            url = %url,
            metadata_id = metadata_id.as_deref().unwrap_or_default(),
            "File uploaded"
        );

        self.publish(FileEvent::FileUploaded {
            url: url.clone(),
            metadata_id: metadata_id.clone(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            size,
            occurred_at: Utc::now(),
        })
        .await;

        Ok(UploadOutcome { url, metadata_id })
    }

    /// One page of metadata; empty when no metadata store is wired.
    pub async fn list_metadata(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<FileMetadata>, AppError> {
        match self.metadata {
            None => Ok(Vec::new()),
            Some(ref repo) => repo.list_metadata(page, page_size).await,
        }
    }

    pub async fn get_metadata(&self, id: &str) -> Result<Option<FileMetadata>, AppError> {
        match self.metadata {
            None => Ok(None),
            Some(ref repo) => repo.get_metadata(id).await,
        }
    }

    /// Delete the record and, best effort, its blob.
    ///
    /// A blob delete failure is logged and published as `blob_delete_failed`;
    /// the record is removed regardless.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome, AppError> {
        let Some(ref repo) = self.metadata else {
            return Ok(DeleteOutcome::NotFound);
        };

        let Some(record) = repo.get_metadata(id).await? else {
            return Ok(DeleteOutcome::NotFound);
        };

        if record.has_blob() {
            if let Err(e) = self.files.delete(&record.path).await {
                tracing::warn!(
                    error = %e,
                    metadata_id = %record.id,
                    path = %record.path,
                    "Blob delete failed, removing metadata anyway"
                );
                self.publish(FileEvent::BlobDeleteFailed {
                    metadata_id: record.id.clone(),
                    path: record.path.clone(),
                    error: e.to_string(),
                    occurred_at: Utc::now(),
                })
                .await;
            }
        }

        repo.delete_metadata(id).await?;

        tracing::info!(metadata_id = %id, path = %record.path, "File deleted");

        self.publish(FileEvent::FileDeleted {
            metadata_id: record.id,
            path: record.path,
            occurred_at: Utc::now(),
        })
        .await;

        Ok(DeleteOutcome::Deleted)
    }

    async fn publish(&self, event: FileEvent) {
        if let Err(e) = self.events.publish(&event).await {
            tracing::warn!(
                error = %e,
                event_type = event.event_type(),
                "Event publication failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ingest_core::{EventPublisherKind, StorageBackend};
    use ingest_db::InMemoryMetadataRepository;
    use ingest_infra::{NoOpEventPublisher, PublishError};
    use ingest_storage::{InMemoryStorage, StorageError, StorageResult};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<FileEvent>>,
    }

    impl RecordingPublisher {
        async fn types(&self) -> Vec<&'static str> {
            self.events.lock().await.iter().map(|e| e.event_type()).collect()
        }
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, event: &FileEvent) -> Result<(), PublishError> {
            self.events.lock().await.push(event.clone());
            Ok(())
        }

        fn kind(&self) -> EventPublisherKind {
            EventPublisherKind::NoOp
        }
    }

    struct FailingPublisher;

    #[async_trait]
    impl EventPublisher for FailingPublisher {
        async fn publish(&self, _event: &FileEvent) -> Result<(), PublishError> {
            Err(PublishError::Send("queue unavailable".to_string()))
        }

        fn kind(&self) -> EventPublisherKind {
            EventPublisherKind::Sqs
        }
    }

    /// Accepts uploads but fails every delete.
    struct UndeletableStorage {
        inner: InMemoryStorage,
    }

    #[async_trait]
    impl FileRepository for UndeletableStorage {
        async fn upload(&self, content: ByteStream, content_type: &str) -> StorageResult<String> {
            self.inner.upload(content, content_type).await
        }

        async fn delete(&self, _address: &str) -> StorageResult<()> {
            Err(StorageError::DeleteFailed("bucket unreachable".to_string()))
        }

        async fn exists(&self, address: &str) -> StorageResult<bool> {
            self.inner.exists(address).await
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Memory
        }
    }

    struct BrokenStorage;

    #[async_trait]
    impl FileRepository for BrokenStorage {
        async fn upload(&self, _content: ByteStream, _content_type: &str) -> StorageResult<String> {
            Err(StorageError::UploadFailed("disk full".to_string()))
        }

        async fn delete(&self, _address: &str) -> StorageResult<()> {
            Ok(())
        }

        async fn exists(&self, _address: &str) -> StorageResult<bool> {
            Ok(false)
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Memory
        }
    }

    /// Metadata store whose writes always fail.
    struct ReadOnlyMetadata;

    #[async_trait]
    impl MetadataRepository for ReadOnlyMetadata {
        async fn create_metadata(&self, _record: FileMetadata) -> Result<String, AppError> {
            Err(AppError::Database("connection reset".to_string()))
        }

        async fn get_metadata(&self, _id: &str) -> Result<Option<FileMetadata>, AppError> {
            Ok(None)
        }

        async fn list_metadata(
            &self,
            _page: i64,
            _page_size: i64,
        ) -> Result<Vec<FileMetadata>, AppError> {
            Ok(Vec::new())
        }

        async fn delete_metadata(&self, _id: &str) -> Result<(), AppError> {
            Ok(())
        }

        fn backend_type(&self) -> ingest_core::MetadataBackend {
            ingest_core::MetadataBackend::Memory
        }
    }

    fn content(data: &'static [u8]) -> ByteStream {
        Box::pin(data)
    }

    #[tokio::test]
    async fn test_upload_with_metadata_returns_id() {
        let storage = InMemoryStorage::new();
        let repo = InMemoryMetadataRepository::new();
        let service = FileService::new(
            Arc::new(storage.clone()),
            Some(Arc::new(repo.clone())),
            Arc::new(NoOpEventPublisher),
        );

        let outcome = service
            .upload(content(b"hello"), "hello.txt", "text/plain", 5)
            .await
            .unwrap();

        let id = outcome.metadata_id.expect("metadata id");
        let record = service.get_metadata(&id).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.file_name, "hello.txt");
        assert_eq!(record.content_type, "text/plain");
        assert_eq!(record.size, 5);
        assert_eq!(record.path, outcome.url);
        assert!(storage.exists(&outcome.url).await.unwrap());
    }

    #[tokio::test]
    async fn test_upload_without_metadata_has_no_id() {
        let storage = InMemoryStorage::new();
        let service = FileService::new(
            Arc::new(storage.clone()),
            None,
            Arc::new(NoOpEventPublisher),
        );

        let outcome = service
            .upload(content(b"hello"), "hello.txt", "text/plain", 5)
            .await
            .unwrap();

        assert!(outcome.metadata_id.is_none());
        assert!(storage.exists(&outcome.url).await.unwrap());
        assert!(service.list_metadata(1, 50).await.unwrap().is_empty());
        assert_eq!(service.get_metadata("anything").await.unwrap(), None);
        assert_eq!(service.delete("anything").await.unwrap(), DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_upload_failure_writes_no_metadata() {
        let repo = InMemoryMetadataRepository::new();
        let publisher = Arc::new(RecordingPublisher::default());
        let service = FileService::new(
            Arc::new(BrokenStorage),
            Some(Arc::new(repo.clone())),
            publisher.clone(),
        );

        let result = service
            .upload(content(b"hello"), "hello.txt", "text/plain", 5)
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(repo.is_empty().await);
        assert!(publisher.types().await.is_empty());
    }

    #[tokio::test]
    async fn test_metadata_failure_leaves_blob_orphaned() {
        let storage = InMemoryStorage::new();
        let publisher = Arc::new(RecordingPublisher::default());
        let service = FileService::new(
            Arc::new(storage.clone()),
            Some(Arc::new(ReadOnlyMetadata)),
            publisher.clone(),
        );

        let result = service
            .upload(content(b"hello"), "hello.txt", "text/plain", 5)
            .await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(storage.len().await, 1);
        assert!(publisher.types().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let service = FileService::new(
            Arc::new(InMemoryStorage::new()),
            Some(Arc::new(InMemoryMetadataRepository::new())),
            Arc::new(NoOpEventPublisher),
        );

        let id = uuid::Uuid::new_v4().to_string();
        assert_eq!(service.get_metadata(&id).await.unwrap(), None);
        assert_eq!(service.delete(&id).await.unwrap(), DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_delete_removes_blob_and_record() {
        let storage = InMemoryStorage::new();
        let publisher = Arc::new(RecordingPublisher::default());
        let service = FileService::new(
            Arc::new(storage.clone()),
            Some(Arc::new(InMemoryMetadataRepository::new())),
            publisher.clone(),
        );

        let outcome = service
            .upload(content(b"bye"), "bye.txt", "text/plain", 3)
            .await
            .unwrap();
        let id = outcome.metadata_id.unwrap();

        assert_eq!(service.delete(&id).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(service.get_metadata(&id).await.unwrap(), None);
        assert!(!storage.exists(&outcome.url).await.unwrap());
        assert_eq!(service.delete(&id).await.unwrap(), DeleteOutcome::NotFound);
        assert_eq!(publisher.types().await, vec!["file_uploaded", "file_deleted"]);
    }

    #[tokio::test]
    async fn test_blob_delete_failure_still_removes_metadata() {
        let publisher = Arc::new(RecordingPublisher::default());
        let service = FileService::new(
            Arc::new(UndeletableStorage {
                inner: InMemoryStorage::new(),
            }),
            Some(Arc::new(InMemoryMetadataRepository::new())),
            publisher.clone(),
        );

        let id = service
            .upload(content(b"stuck"), "stuck.bin", "application/octet-stream", 5)
            .await
            .unwrap()
            .metadata_id
            .unwrap();

        assert_eq!(service.delete(&id).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(service.get_metadata(&id).await.unwrap(), None);
        assert_eq!(
            publisher.types().await,
            vec!["file_uploaded", "blob_delete_failed", "file_deleted"]
        );
    }

    #[tokio::test]
    async fn test_record_without_path_skips_blob_delete() {
        let repo = InMemoryMetadataRepository::new();
        let record = FileMetadata::new("ghost.txt", "text/plain", 0, "");
        let id = repo.create_metadata(record).await.unwrap();

        let publisher = Arc::new(RecordingPublisher::default());
        let service = FileService::new(
            Arc::new(UndeletableStorage {
                inner: InMemoryStorage::new(),
            }),
            Some(Arc::new(repo)),
            publisher.clone(),
        );

        assert_eq!(service.delete(&id).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(publisher.types().await, vec!["file_deleted"]);
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_fail_upload() {
        let service = FileService::new(
            Arc::new(InMemoryStorage::new()),
            Some(Arc::new(InMemoryMetadataRepository::new())),
            Arc::new(FailingPublisher),
        );

        let outcome = service
            .upload(content(b"hello"), "hello.txt", "text/plain", 5)
            .await
            .unwrap();
        let id = outcome.metadata_id.unwrap();
        assert_eq!(service.delete(&id).await.unwrap(), DeleteOutcome::Deleted);
    }

    #[tokio::test]
    async fn test_list_delegates_paging() {
        let service = FileService::new(
            Arc::new(InMemoryStorage::new()),
            Some(Arc::new(InMemoryMetadataRepository::new())),
            Arc::new(NoOpEventPublisher),
        );

        for i in 0..3 {
            service
                .upload(content(b"x"), &format!("{}.txt", i), "text/plain", 1)
                .await
                .unwrap();
        }

        assert_eq!(service.list_metadata(1, 2).await.unwrap().len(), 2);
        assert_eq!(service.list_metadata(2, 2).await.unwrap().len(), 1);
        assert_eq!(service.list_metadata(0, 0).await.unwrap().len(), 3);
    }
}
