use super::{EventPublisher, NoOpEventPublisher, PublishError};
use ingest_core::{Config, EventPublisherKind};
use std::sync::Arc;

/// Create the event publisher selected by `EVENT_PUBLISHER`
pub async fn create_event_publisher(
    config: &Config,
) -> Result<Arc<dyn EventPublisher>, PublishError> {
    let kind = config.event_publisher();
    tracing::info!(publisher = %kind, "Initializing event publisher");

    match kind {
        EventPublisherKind::NoOp => Ok(Arc::new(NoOpEventPublisher)),

        #[cfg(feature = "events-sqs")]
        EventPublisherKind::Sqs => {
            let queue_url = config
                .sqs_queue_url()
                .map(String::from)
                .ok_or_else(|| PublishError::Config("SQS_QUEUE_URL not configured".to_string()))?;
            let region = config.aws_region().map(String::from);

            let publisher = super::SqsEventPublisher::new(queue_url, region).await;
            Ok(Arc::new(publisher))
        }

        #[cfg(not(feature = "events-sqs"))]
        EventPublisherKind::Sqs => Err(PublishError::Config(
            "SQS publisher not available (events-sqs feature not enabled)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ingest_core::{FileEvent, IngestConfig};

    #[tokio::test]
    async fn test_default_publisher_is_noop() {
        let config = Config::new(IngestConfig::development("unused"));
        let publisher = create_event_publisher(&config).await.unwrap();
        assert_eq!(publisher.kind(), EventPublisherKind::NoOp);

        let event = FileEvent::FileDeleted {
            metadata_id: "abc".to_string(),
            path: String::new(),
            occurred_at: Utc::now(),
        };
        publisher.publish(&event).await.unwrap();
    }

    #[tokio::test]
    async fn test_sqs_without_queue_url_is_rejected() {
        let mut ingest = IngestConfig::development("unused");
        ingest.event_publisher = EventPublisherKind::Sqs;
        let result = create_event_publisher(&Config::new(ingest)).await;
        assert!(matches!(result, Err(PublishError::Config(_))));
    }
}
