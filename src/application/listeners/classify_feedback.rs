//! Reacts to `classify.feedback.message`: runs the classification use case
//! for the feedback referenced by an outbox message, then marks the message
//! processed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::handlers::feedback::{
    ClassifyFeedbackCommand, ClassifyFeedbackHandler, FeedbackGivenEvent,
};
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, OutboxMessageId};
use crate::ports::{EventHandler, OutboxStore};

/// Event type dispatched by the outbox processor for pending feedback.
pub const CLASSIFY_FEEDBACK_MESSAGE: &str = "classify.feedback.message";

/// Payload of `classify.feedback.message`: a pointer into the outbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyFeedbackMessage {
    pub outbox_message_id: OutboxMessageId,
}

/// Listener driving the classification workflow.
///
/// Idempotent under duplicate delivery: an already-processed outbox message
/// is acknowledged without re-classifying. On failure the message stays
/// unprocessed and the next processor tick retries it.
pub struct ClassifyFeedbackListener {
    outbox_store: Arc<dyn OutboxStore>,
    classify_handler: Arc<ClassifyFeedbackHandler>,
}

impl ClassifyFeedbackListener {
    pub fn new(
        outbox_store: Arc<dyn OutboxStore>,
        classify_handler: Arc<ClassifyFeedbackHandler>,
    ) -> Self {
        Self {
            outbox_store,
            classify_handler,
        }
    }
}

#[async_trait]
impl EventHandler for ClassifyFeedbackListener {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let pointer: ClassifyFeedbackMessage = event
            .payload_as()
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        let Some(message) = self.outbox_store.find_by_id(pointer.outbox_message_id).await? else {
            warn!(
                outbox_message_id = %pointer.outbox_message_id,
                "outbox message vanished, nothing to classify"
            );
            return Ok(());
        };

        if message.processed {
            debug!(
                outbox_message_id = %message.id,
                "outbox message already processed, skipping"
            );
            return Ok(());
        }

        let recorded: FeedbackGivenEvent = serde_json::from_value(message.payload.clone())
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        self.classify_handler
            .handle(ClassifyFeedbackCommand {
                feedback_id: recorded.feedback_id,
                team_id: recorded.team_id,
                message: recorded.message,
            })
            .await
            .map_err(DomainError::from)?;

        // Only after classification succeeded; a failure above leaves the
        // message unprocessed for the next tick.
        self.outbox_store.mark_processed(message.id).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ClassifyFeedbackListener"
    }
}
