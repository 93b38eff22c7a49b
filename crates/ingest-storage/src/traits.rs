//! Blob storage port
//!
//! This module defines the `FileRepository` trait that all blob backends implement.

use crate::StorageBackend;
use async_trait::async_trait;
use ingest_core::AppError;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Blob already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid storage address: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Readable upload body handed to a backend.
pub type ByteStream = Pin<Box<dyn AsyncRead + Send + Unpin>>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            StorageError::IoError(err) => AppError::Storage(format!("IO error: {}", err)),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Blob storage port
///
/// Backends hand out opaque addresses; callers keep them (in metadata) and
/// pass them back to `delete`.
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Store the stream under a fresh random name and return its address.
    ///
    /// The reader is consumed until EOF. An existing blob is never overwritten.
    async fn upload(&self, content: ByteStream, content_type: &str) -> StorageResult<String>;

    /// Delete the blob at `address`. Deleting a missing blob succeeds.
    async fn delete(&self, address: &str) -> StorageResult<()>;

    /// Check whether a blob exists at `address`.
    async fn exists(&self, address: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingest_core::ErrorMetadata;

    #[test]
    fn test_storage_error_maps_to_app_error() {
        let app: AppError = StorageError::UploadFailed("timeout".to_string()).into();
        assert!(matches!(app, AppError::Storage(ref msg) if msg.contains("timeout")));
        assert_eq!(app.http_status_code(), 500);

        let app: AppError = StorageError::InvalidKey("bad".to_string()).into();
        assert!(matches!(app, AppError::InvalidInput(_)));
    }
}
