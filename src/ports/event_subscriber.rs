//! EventSubscriber port - interface for registering event handlers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Implementations should be:
/// - **Idempotent** - safe to call multiple times with the same event
/// - **Isolated** - an error must not corrupt state for other handlers
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name, used in log lines when handling fails.
    fn name(&self) -> &'static str;
}

/// Port for subscribing handlers to domain events.
///
/// Handlers for one event type run synchronously in registration order when
/// a matching event is published.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe a handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe the same handler to multiple event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// Combined trait for event bus implementations.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_handler_object_safe(_: &dyn EventHandler) {}

    #[allow(dead_code)]
    fn assert_subscriber_object_safe(_: &dyn EventSubscriber) {}
}
