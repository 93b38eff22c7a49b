#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{FileRepository, InMemoryStorage, StorageBackend, StorageError, StorageResult};
use ingest_core::Config;
use std::sync::Arc;

/// Create the blob backend selected by configuration
pub async fn create_file_repository(config: &Config) -> StorageResult<Arc<dyn FileRepository>> {
    let backend = config.storage_backend();
    tracing::info!(backend = %backend, "Initializing blob storage");

    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config
                .s3_region()
                .or_else(|| config.aws_region())
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
                })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage = S3Storage::new(bucket, region, endpoint).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path();
            if base_path.is_empty() {
                return Err(StorageError::ConfigError(
                    "LOCAL_STORAGE_PATH not configured".to_string(),
                ));
            }

            let storage =
                LocalStorage::new(base_path, config.local_storage_base_url().to_string()).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),

        StorageBackend::Memory => Ok(Arc::new(InMemoryStorage::new())),
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use ingest_core::IngestConfig;

    #[tokio::test]
    async fn test_factory_builds_local_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(IngestConfig::development(
            dir.path().to_string_lossy().to_string(),
        ));

        let repo = create_file_repository(&config).await.unwrap();
        assert_eq!(repo.backend_type(), StorageBackend::Local);
    }

    #[tokio::test]
    async fn test_factory_builds_memory_backend() {
        let mut ingest = IngestConfig::development("unused");
        ingest.storage_backend = StorageBackend::Memory;
        let repo = create_file_repository(&Config::new(ingest)).await.unwrap();
        assert_eq!(repo.backend_type(), StorageBackend::Memory);
    }
}
