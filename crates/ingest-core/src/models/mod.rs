//! Data models for the application
//!
//! Records exchanged between the HTTP boundary, the orchestrator and the
//! backend adapters.

mod event;
mod file_metadata;
mod pagination;

// Re-export all models for convenient imports
pub use event::*;
pub use file_metadata::*;
pub use pagination::*;
