//! In-memory event bus - the production event transport.
//!
//! Delivery is synchronous and local to the process: publishing runs every
//! subscribed handler, in registration order, inside the caller's call
//! stack. A handler error is logged and does not stop the remaining
//! handlers or fail the publish; the triggering aggregate write has already
//! committed by the time handlers run.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::error;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(Vec::new()),
        }
    }

    // === Test helpers ===

    /// All published events, for assertions in tests.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .clone()
    }

    /// Published events of one type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Whether an event of this type has been published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .iter()
            .any(|e| e.event_type == event_type)
    }

    /// Count of published events.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .len()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .push(event.clone());

        // Clone handlers to release the lock before the await points.
        let type_handlers: Vec<Arc<dyn EventHandler>> = {
            let handlers = self
                .handlers
                .read()
                .expect("InMemoryEventBus: handlers lock poisoned");
            handlers
                .get(&event.event_type)
                .cloned()
                .unwrap_or_default()
        };

        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                // Log and keep going; the write this event announces has
                // already been persisted.
                error!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    event_id = %event.event_id,
                    error = %e,
                    "event handler failed"
                );
            }
        }

        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        let mut handlers = self
            .handlers
            .write()
            .expect("InMemoryEventBus: handlers write lock poisoned");
        handlers
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = self
            .handlers
            .write()
            .expect("InMemoryEventBus: handlers write lock poisoned");
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, EventId, EventMetadata, Timestamp};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn test_envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope {
            event_id: EventId::new(),
            event_type: event_type.to_string(),
            aggregate_id: aggregate_id.to_string(),
            aggregate_type: "Test".to_string(),
            occurred_at: Timestamp::now(),
            payload: json!({}),
            metadata: EventMetadata::default(),
        }
    }

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "Handler failed"))
        }
        fn name(&self) -> &'static str {
            "FailingHandler"
        }
    }

    #[tokio::test]
    async fn publish_stores_event() {
        let bus = InMemoryEventBus::new();
        bus.publish(test_envelope("test.event", "agg-1")).await.unwrap();

        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("test.event"));
    }

    #[tokio::test]
    async fn handlers_run_for_matching_type_only() {
        let bus = Arc::new(InMemoryEventBus::new());
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe("type.a", Arc::new(CountingHandler(counter.clone())));

        bus.publish(test_envelope("type.a", "1")).await.unwrap();
        bus.publish(test_envelope("type.b", "2")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn handlers_run_in_registration_order() {
        let bus = Arc::new(InMemoryEventBus::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        struct OrderedHandler(&'static str, Arc<Mutex<Vec<&'static str>>>);

        #[async_trait]
        impl EventHandler for OrderedHandler {
            async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
                self.1.lock().unwrap().push(self.0);
                Ok(())
            }
            fn name(&self) -> &'static str {
                self.0
            }
        }

        bus.subscribe("test.event", Arc::new(OrderedHandler("first", order.clone())));
        bus.subscribe("test.event", Arc::new(OrderedHandler("second", order.clone())));
        bus.subscribe("test.event", Arc::new(OrderedHandler("third", order.clone())));

        bus.publish(test_envelope("test.event", "1")).await.unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn handler_error_does_not_fail_publish_or_stop_others() {
        let bus = Arc::new(InMemoryEventBus::new());
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe("test.event", Arc::new(FailingHandler));
        bus.subscribe("test.event", Arc::new(CountingHandler(counter.clone())));

        let result = bus.publish(test_envelope("test.event", "1")).await;

        assert!(result.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn subscribe_all_registers_for_multiple_types() {
        let bus = Arc::new(InMemoryEventBus::new());
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe_all(
            &["type.a", "type.b"],
            Arc::new(CountingHandler(counter.clone())),
        );

        bus.publish(test_envelope("type.a", "1")).await.unwrap();
        bus.publish(test_envelope("type.b", "2")).await.unwrap();
        bus.publish(test_envelope("type.c", "3")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn events_of_type_filters() {
        let bus = InMemoryEventBus::new();
        bus.publish(test_envelope("type.a", "1")).await.unwrap();
        bus.publish(test_envelope("type.b", "2")).await.unwrap();
        bus.publish(test_envelope("type.a", "3")).await.unwrap();

        assert_eq!(bus.events_of_type("type.a").len(), 2);
    }
}
