//! EventPublisher port - interface for publishing domain events.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Delivery is at-least-once; handlers may receive duplicates. A publish
/// error means the transport itself failed, not that a handler rejected the
/// event - handler failures are the transport's concern and are logged there.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events sequentially, best-effort.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}
}
