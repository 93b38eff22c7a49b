use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain events announced through the event publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileEvent {
    #[serde(rename_all = "camelCase")]
    FileUploaded {
        url: String,
        metadata_id: Option<String>,
        file_name: String,
        content_type: String,
        size: i64,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    FileDeleted {
        metadata_id: String,
        path: String,
        occurred_at: DateTime<Utc>,
    },
    /// Blob removal failed while the metadata record was still deleted.
    #[serde(rename_all = "camelCase")]
    BlobDeleteFailed {
        metadata_id: String,
        path: String,
        error: String,
        occurred_at: DateTime<Utc>,
    },
}

impl FileEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            FileEvent::FileUploaded { .. } => "file_uploaded",
            FileEvent::FileDeleted { .. } => "file_deleted",
            FileEvent::BlobDeleteFailed { .. } => "blob_delete_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tagged_by_type() {
        let event = FileEvent::BlobDeleteFailed {
            metadata_id: "abc".to_string(),
            path: "http://x/files/abc".to_string(),
            error: "boom".to_string(),
            occurred_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "blob_delete_failed");
        assert_eq!(json["metadataId"], "abc");
        assert_eq!(event.event_type(), "blob_delete_failed");
    }
}
