use super::{EventPublisher, PublishError};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::Client as SqsClient;
use ingest_core::{EventPublisherKind, FileEvent};

/// Publishes events as JSON message bodies on an SQS queue.
#[derive(Clone)]
pub struct SqsEventPublisher {
    client: SqsClient,
    queue_url: String,
}

impl SqsEventPublisher {
    /// Build a client from the default AWS credential chain.
    pub async fn new(queue_url: String, region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;

        Self::with_client(SqsClient::new(&config), queue_url)
    }

    pub fn with_client(client: SqsClient, queue_url: String) -> Self {
        Self { client, queue_url }
    }
}

#[async_trait]
impl EventPublisher for SqsEventPublisher {
    async fn publish(&self, event: &FileEvent) -> Result<(), PublishError> {
        let body = serde_json::to_string(event)?;
        let start = std::time::Instant::now();

        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| PublishError::Send(e.to_string()))?;

        tracing::debug!(
            event_type = event.event_type(),
            message_id = output.message_id().unwrap_or_default(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Event published to SQS"
        );

        Ok(())
    }

    fn kind(&self) -> EventPublisherKind {
        EventPublisherKind::Sqs
    }
}
