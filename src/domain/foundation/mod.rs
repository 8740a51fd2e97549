//! Shared building blocks for the domain layer: errors, events, typed ids and
//! timestamps.

pub mod errors;
pub mod events;
pub mod ids;
pub mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{FeedbackId, InvitationId, OutboxMessageId, PeerId, TaxonomyId, TeamId};
pub use timestamp::Timestamp;
