use crate::db::metadata::{ensure_id, MetadataRepository};
use ingest_core::models::{normalize_page, page_offset};
use ingest_core::{AppError, FileMetadata, MetadataBackend};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};

/// PostgreSQL document store
///
/// Each row wraps the serialized record (`payload JSONB`) next to the id and
/// creation timestamp used for lookups and ordering.
#[derive(Clone)]
pub struct PgMetadataRepository {
    pool: PgPool,
}

impl PgMetadataRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MetadataRepository for PgMetadataRepository {
    #[tracing::instrument(skip(self, record), fields(db.table = "file_metadata", db.operation = "insert"))]
    async fn create_metadata(&self, record: FileMetadata) -> Result<String, AppError> {
        let record = ensure_id(record);

        sqlx::query::<Postgres>(
            r#"
            INSERT INTO file_metadata (id, payload, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&record.id)
        .bind(Json(&record))
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %record.id, "Metadata record created");

        Ok(record.id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "file_metadata", db.operation = "select", db.record_id = %id))]
    async fn get_metadata(&self, id: &str) -> Result<Option<FileMetadata>, AppError> {
        let row = sqlx::query_as::<Postgres, (Json<FileMetadata>,)>(
            "SELECT payload FROM file_metadata WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(Json(record),)| record))
    }

    #[tracing::instrument(skip(self), fields(db.table = "file_metadata", db.operation = "select"))]
    async fn list_metadata(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<FileMetadata>, AppError> {
        let (page, page_size) = normalize_page(page, page_size);
        let offset = page_offset(page, page_size);

        let rows = sqlx::query_as::<Postgres, (Json<FileMetadata>,)>(
            r#"
            SELECT payload FROM file_metadata
            ORDER BY created_at DESC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(Json(record),)| record).collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "file_metadata", db.operation = "delete", db.record_id = %id))]
    async fn delete_metadata(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query::<Postgres>("DELETE FROM file_metadata WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id = %id, rows_affected = result.rows_affected(), "Metadata record deleted");

        Ok(())
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Postgres
    }
}
