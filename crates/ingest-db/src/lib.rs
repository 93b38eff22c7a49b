//! Metadata document store for Ingest.
//!
//! Exposes the `MetadataRepository` port with a PostgreSQL (JSONB) adapter
//! and an in-process adapter, plus the configuration-driven factory.

pub mod db;

pub use db::{
    create_metadata_repository, setup_database, InMemoryMetadataRepository, MetadataRepository,
    PgMetadataRepository,
};
