//! Ingest Storage Library
//!
//! This crate provides the `FileRepository` port and its blob backends:
//! S3 (via `object_store`), local filesystem and an in-process map.
//!
//! # Blob addressing
//!
//! Every upload is written under a freshly generated key, `files/{uuid}`.
//! Callers only ever see the address (a URL); backends derive the key back
//! from the last path segment of that address. Keys are never reused, so an
//! upload never overwrites an existing blob.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_file_repository;
pub use ingest_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::InMemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ByteStream, FileRepository, StorageError, StorageResult};
