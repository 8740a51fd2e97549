//! OutboxStore port - durable record of cross-boundary effects.
//!
//! Use cases record an outbox message in the same step as publishing the
//! in-process event. A background processor polls unprocessed messages on a
//! timer and re-derives follow-up work from them, giving at-least-once
//! delivery across restarts. Messages are never deleted and `processed`
//! never goes back to `false`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{DomainError, OutboxMessageId, Timestamp};

/// One durable outbox row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxMessage {
    pub id: OutboxMessageId,
    /// Event type this message was recorded for (e.g. "feedback.given").
    pub event_type: String,
    /// Opaque payload; its shape is owned by the recording use case.
    pub payload: JsonValue,
    pub created_at: Timestamp,
    pub processed: bool,
}

impl OutboxMessage {
    pub fn new(event_type: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            id: OutboxMessageId::new(),
            event_type: event_type.into(),
            payload,
            created_at: Timestamp::now(),
            processed: false,
        }
    }
}

/// Port for the durable outbox.
#[async_trait]
pub trait OutboxStore: Send + Sync {
    /// Persists a new unprocessed message and returns it.
    async fn record(
        &self,
        event_type: &str,
        payload: JsonValue,
    ) -> Result<OutboxMessage, DomainError>;

    /// All messages with `processed = false`, oldest first.
    async fn fetch_unprocessed(&self) -> Result<Vec<OutboxMessage>, DomainError>;

    /// Loads a single message by id.
    async fn find_by_id(&self, id: OutboxMessageId) -> Result<Option<OutboxMessage>, DomainError>;

    /// Marks a message processed. Idempotent.
    async fn mark_processed(&self, id: OutboxMessageId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn OutboxStore) {}

    #[test]
    fn new_message_starts_unprocessed() {
        let msg = OutboxMessage::new("feedback.given", json!({"feedback_id": "f-1"}));
        assert!(!msg.processed);
        assert_eq!(msg.event_type, "feedback.given");
    }
}
