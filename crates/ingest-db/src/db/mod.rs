//! Metadata repositories
//
// Port shared by every backend
pub mod metadata;
//
// Backends
pub mod memory;
pub mod postgres;
//
// Pool setup and backend selection
pub mod factory;

pub use factory::{create_metadata_repository, setup_database};
pub use memory::InMemoryMetadataRepository;
pub use metadata::MetadataRepository;
pub use postgres::PgMetadataRepository;
