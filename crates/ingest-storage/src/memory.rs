//! In-process blob store for tests and local development.

use crate::keys::{generate_storage_key, join_url, key_from_address};
use crate::traits::{ByteStream, FileRepository, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::RwLock;

pub const MEMORY_BASE_URL: &str = "memory://blobs";

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    blobs: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the blob at `address`, if present.
    pub async fn get(&self, address: &str) -> StorageResult<Option<Bytes>> {
        let key = key_from_address(address)?;
        Ok(self.blobs.read().await.get(&key).cloned())
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl FileRepository for InMemoryStorage {
    async fn upload(&self, mut content: ByteStream, _content_type: &str) -> StorageResult<String> {
        let mut data = Vec::new();
        content
            .read_to_end(&mut data)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Failed to read stream: {}", e)))?;

        let key = generate_storage_key();
        let size = data.len();

        let mut blobs = self.blobs.write().await;
        if blobs.contains_key(&key) {
            return Err(StorageError::AlreadyExists(key));
        }
        blobs.insert(key.clone(), Bytes::from(data));
        drop(blobs);

        tracing::debug!(key = %key, size_bytes = size, "Memory storage upload successful");

        Ok(join_url(MEMORY_BASE_URL, &key))
    }

    async fn delete(&self, address: &str) -> StorageResult<()> {
        let key = key_from_address(address)?;
        self.blobs.write().await.remove(&key);
        Ok(())
    }

    async fn exists(&self, address: &str) -> StorageResult<bool> {
        let key = key_from_address(address)?;
        Ok(self.blobs.read().await.contains_key(&key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
