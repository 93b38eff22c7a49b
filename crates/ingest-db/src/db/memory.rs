use crate::db::metadata::{ensure_id, MetadataRepository};
use ingest_core::models::{normalize_page, page_offset};
use ingest_core::{AppError, FileMetadata, MetadataBackend};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local metadata store
///
/// Contents are lost on restart. Used for development and tests.
#[derive(Clone, Default)]
pub struct InMemoryMetadataRepository {
    records: Arc<RwLock<HashMap<String, FileMetadata>>>,
}

impl InMemoryMetadataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl MetadataRepository for InMemoryMetadataRepository {
    async fn create_metadata(&self, record: FileMetadata) -> Result<String, AppError> {
        let record = ensure_id(record);
        let id = record.id.clone();

        // Same contract as the primary key in the Postgres table.
        match self.records.write().await.entry(id.clone()) {
            Entry::Occupied(_) => Err(AppError::Database(format!(
                "Metadata record {} already exists",
                id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(id)
            }
        }
    }

    async fn get_metadata(&self, id: &str) -> Result<Option<FileMetadata>, AppError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list_metadata(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<FileMetadata>, AppError> {
        let (page, page_size) = normalize_page(page, page_size);
        let offset = usize::try_from(page_offset(page, page_size)).unwrap_or(usize::MAX);
        let limit = usize::try_from(page_size).unwrap_or(usize::MAX);

        let mut records: Vec<FileMetadata> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(records.into_iter().skip(offset).take(limit).collect())
    }

    async fn delete_metadata(&self, id: &str) -> Result<(), AppError> {
        self.records.write().await.remove(id);
        Ok(())
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Memory
    }
}
