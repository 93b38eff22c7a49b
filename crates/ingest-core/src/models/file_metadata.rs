use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Descriptive record for one stored blob.
///
/// `file_name` and `content_type` are client-supplied and stored verbatim.
/// `size` is whatever the upload reported and is never re-verified against the blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    /// Address returned by the storage backend; used to delete the blob.
    pub path: String,
    pub created_at: DateTime<Utc>,
}

impl FileMetadata {
    /// Build a record with a fresh id, stamped with the current UTC time.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        size: i64,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            size,
            path: path.into(),
            created_at: Utc::now(),
        }
    }

    pub fn has_blob(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub url: String,
    /// `None` when no metadata repository is configured.
    pub metadata_id: Option<String>,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}
