use super::{EventPublisher, PublishError};
use async_trait::async_trait;
use ingest_core::{EventPublisherKind, FileEvent};

/// Publisher that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, event: &FileEvent) -> Result<(), PublishError> {
        tracing::trace!(event_type = event.event_type(), "Event dropped by no-op publisher");
        Ok(())
    }

    fn kind(&self) -> EventPublisherKind {
        EventPublisherKind::NoOp
    }
}
