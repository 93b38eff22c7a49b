//! Ingest Infrastructure
//!
//! Event publication (no-op and SQS) and tracing initialization.

pub mod events;
pub mod telemetry;

pub use events::{create_event_publisher, EventPublisher, NoOpEventPublisher, PublishError};
#[cfg(feature = "events-sqs")]
pub use events::SqsEventPublisher;
pub use telemetry::init_telemetry;
