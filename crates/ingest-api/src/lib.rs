//! Ingest API Library
//!
//! This crate provides the HTTP handlers, the API key middleware and
//! application setup.

// Module declarations
mod api_doc;
mod handlers;
pub mod setup;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
