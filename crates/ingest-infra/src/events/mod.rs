//! Domain event publication
//!
//! Publishing is fire-and-forget: callers log failures and carry on.

mod factory;
mod noop;
#[cfg(feature = "events-sqs")]
mod sqs;

pub use factory::create_event_publisher;
pub use noop::NoOpEventPublisher;
#[cfg(feature = "events-sqs")]
pub use sqs::SqsEventPublisher;

use async_trait::async_trait;
use ingest_core::{EventPublisherKind, FileEvent};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to send event: {0}")]
    Send(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Announce an event. At most once; no retry.
    async fn publish(&self, event: &FileEvent) -> Result<(), PublishError>;

    fn kind(&self) -> EventPublisherKind;
}
