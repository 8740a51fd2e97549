//! Event transport adapters.

mod in_memory;
mod outbox_processor;

pub use in_memory::InMemoryEventBus;
pub use outbox_processor::{OutboxProcessor, OutboxProcessorConfig};
