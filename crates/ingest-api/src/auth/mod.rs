//! Shared-secret authentication

pub mod middleware;

pub use middleware::{api_key_middleware, ApiKeyAuth};
