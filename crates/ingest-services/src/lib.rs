//! Ingest Services Layer
//!
//! Hosts the `FileService` orchestrator and re-exports the ports and
//! factories it is wired with, so the API crate depends on a single facade.

pub mod services;

pub use ingest_db::{create_metadata_repository, MetadataRepository};
pub use ingest_infra::{create_event_publisher, EventPublisher, PublishError};
pub use ingest_storage::{create_file_repository, ByteStream, FileRepository, StorageError};
pub use services::FileService;
