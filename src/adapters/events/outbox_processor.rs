//! Background outbox processor.
//!
//! Polls the durable outbox on a fixed interval and turns unprocessed
//! messages into follow-up work. A `feedback.given` message becomes a
//! `classify.feedback.message` event carrying a pointer to the outbox row;
//! the classification listener marks the row processed once it succeeds, so
//! a crash between dispatch and classification is retried on a later tick.
//! Messages of any other type have no follow-up and are acknowledged
//! directly. Delivery is at-least-once.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::handlers::feedback::FEEDBACK_GIVEN;
use crate::application::listeners::{ClassifyFeedbackMessage, CLASSIFY_FEEDBACK_MESSAGE};
use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventPublisher, OutboxMessage, OutboxStore};

#[derive(Debug, Clone)]
pub struct OutboxProcessorConfig {
    /// Time between polls of the outbox table.
    pub poll_interval: Duration,
}

impl Default for OutboxProcessorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
        }
    }
}

impl OutboxProcessorConfig {
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

pub struct OutboxProcessor {
    outbox_store: Arc<dyn OutboxStore>,
    publisher: Arc<dyn EventPublisher>,
    config: OutboxProcessorConfig,
}

impl OutboxProcessor {
    pub fn new(outbox_store: Arc<dyn OutboxStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            outbox_store,
            publisher,
            config: OutboxProcessorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: OutboxProcessorConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the poll loop until the shutdown signal flips to `true`.
    /// Processes one final batch before returning so a clean shutdown does
    /// not strand freshly recorded messages until the next start.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            poll_interval_secs = self.config.poll_interval.as_secs(),
            "outbox processor started"
        );
        let mut ticker = interval(self.config.poll_interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("outbox processor shutting down, draining final batch");
                        self.process_batch().await;
                        return;
                    }
                }
                _ = ticker.tick() => {
                    self.process_batch().await;
                }
            }
        }
    }

    /// One polling pass. Errors on a single message are logged and do not
    /// abort the rest of the batch; the failed message stays unprocessed.
    pub async fn process_batch(&self) {
        let messages = match self.outbox_store.fetch_unprocessed().await {
            Ok(messages) => messages,
            Err(e) => {
                error!(error = %e, "failed to fetch unprocessed outbox messages");
                return;
            }
        };

        if messages.is_empty() {
            return;
        }
        debug!(count = messages.len(), "processing outbox batch");

        for message in messages {
            if let Err(e) = self.process_message(&message).await {
                error!(
                    outbox_message_id = %message.id,
                    event_type = %message.event_type,
                    error = %e,
                    "failed to process outbox message, will retry on next tick"
                );
            }
        }
    }

    async fn process_message(&self, message: &OutboxMessage) -> Result<(), DomainError> {
        match message.event_type.as_str() {
            FEEDBACK_GIVEN => {
                let pointer = ClassifyFeedbackMessage {
                    outbox_message_id: message.id,
                };
                let envelope = EventEnvelope::new(
                    CLASSIFY_FEEDBACK_MESSAGE,
                    message.id.to_string(),
                    "OutboxMessage",
                    json!(pointer),
                );
                // Not marked processed here; the classification listener
                // acknowledges the row after it succeeds.
                self.publisher.publish(envelope).await
            }
            other => {
                warn!(
                    outbox_message_id = %message.id,
                    event_type = other,
                    "no follow-up registered for outbox message type, acknowledging"
                );
                self.outbox_store.mark_processed(message.id).await
            }
        }
    }
}
