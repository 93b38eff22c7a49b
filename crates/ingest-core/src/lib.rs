//! Ingest Core Library
//!
//! This crate provides the domain records, error types, configuration and
//! backend selectors shared by every Ingest component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, IngestConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{DeleteOutcome, FileEvent, FileMetadata, PageRequest, UploadOutcome};
pub use storage_types::{EventPublisherKind, MetadataBackend, StorageBackend};
