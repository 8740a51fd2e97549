//! Event infrastructure for domain event publishing and handling.
//!
//! - `EventId` - unique identifier for events (deduplication)
//! - `EventMetadata` - correlation context
//! - `EventEnvelope` - transport wrapper for domain events
//! - `DomainEvent` - trait that all domain events implement
//! - `domain_event!` - macro to implement `DomainEvent` with minimal boilerplate

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Trait that all domain events must implement.
///
/// Provides the contract for event identification, routing and ordering.
/// Use the `domain_event!` macro to implement this trait.
pub trait DomainEvent: Send + Sync {
    /// Event type string used for routing (e.g., "team.created").
    fn event_type(&self) -> &'static str;

    /// ID of the aggregate that emitted this event.
    fn aggregate_id(&self) -> String;

    /// Type of aggregate (e.g., "Team", "Feedback").
    fn aggregate_type(&self) -> &'static str;

    /// When the event occurred.
    fn occurred_at(&self) -> Timestamp;

    /// Unique ID for this event instance.
    fn event_id(&self) -> EventId;
}

/// Extension trait providing `to_envelope()` for serializable domain events.
///
/// Blanket-implemented for any `DomainEvent + Serialize`, so event authors
/// get envelope conversion for free.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    /// Converts this domain event into an `EventEnvelope` for transport.
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope {
            event_id: self.event_id(),
            event_type: self.event_type().to_string(),
            aggregate_id: self.aggregate_id(),
            aggregate_type: self.aggregate_type().to_string(),
            occurred_at: self.occurred_at(),
            payload: serde_json::to_value(self)
                .expect("Event serialization should never fail for well-formed events"),
            metadata: EventMetadata::default(),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Implements the `DomainEvent` trait for an event struct.
///
/// # Example
///
/// ```ignore
/// domain_event!(
///     TeamCreatedEvent,
///     event_type = "team.created",
///     aggregate_id = team_id,
///     aggregate_type = "Team",
///     occurred_at = created_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        event_type = $event_type:expr,
        aggregate_id = $agg_id_field:ident,
        aggregate_type = $agg_type:expr,
        occurred_at = $occurred_field:ident,
        event_id = $event_id_field:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                $agg_type
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id_field.clone()
            }
        }
    };
}

pub use domain_event;

/// Unique identifier for events (used for deduplication).
///
/// Stored as a string so that ids derived from other sources (e.g. an outbox
/// row id used as correlation key) fit without conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new random EventId using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates an EventId from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation metadata that flows through the event system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// ID linking related events across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    /// ID of the event that directly caused this event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub causation_id: Option<String>,

    /// Auth subject that initiated the action leading to this event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Transport envelope for domain events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique ID for this event instance.
    pub event_id: EventId,

    /// Event type for routing (e.g., "feedback.given").
    pub event_type: String,

    /// ID of the aggregate that emitted this event.
    pub aggregate_id: String,

    /// Type of aggregate (e.g., "Team", "Invitation").
    pub aggregate_type: String,

    /// When the event occurred.
    pub occurred_at: Timestamp,

    /// Event-specific payload as JSON.
    pub payload: JsonValue,

    /// Correlation metadata.
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Creates a new EventEnvelope with required fields.
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        aggregate_type: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            event_type: event_type.into(),
            aggregate_id: aggregate_id.into(),
            aggregate_type: aggregate_type.into(),
            occurred_at: Timestamp::now(),
            payload,
            metadata: EventMetadata::default(),
        }
    }

    /// Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(id.into());
        self
    }

    /// Add causation ID (ID of event that caused this one).
    pub fn with_causation_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.causation_id = Some(id.into());
        self
    }

    /// Add the initiating auth subject for audit.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.metadata.subject = Some(subject.into());
        self
    }

    /// Deserialize payload to a specific event type.
    pub fn payload_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_id_generates_unique_values() {
        assert_ne!(EventId::new(), EventId::new());
    }

    #[test]
    fn event_id_from_string_preserves_value() {
        let id = EventId::from_string("outbox-row-123");
        assert_eq!(id.as_str(), "outbox-row-123");
    }

    #[test]
    fn event_metadata_serializes_without_none_fields() {
        let meta = EventMetadata {
            correlation_id: Some("req-123".to_string()),
            causation_id: None,
            subject: None,
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("correlation_id"));
        assert!(!json.contains("causation_id"));
        assert!(!json.contains("subject"));
    }

    #[test]
    fn event_envelope_new_creates_with_defaults() {
        let envelope = EventEnvelope::new(
            "team.created",
            "team-123",
            "Team",
            json!({"teamName": "Pioneers"}),
        );

        assert_eq!(envelope.event_type, "team.created");
        assert_eq!(envelope.aggregate_id, "team-123");
        assert_eq!(envelope.aggregate_type, "Team");
        assert_eq!(envelope.payload["teamName"], "Pioneers");
        assert!(envelope.metadata.correlation_id.is_none());
    }

    #[test]
    fn event_envelope_builder_chain() {
        let envelope = EventEnvelope::new("test.event", "agg-1", "Test", json!({}))
            .with_correlation_id("req-123")
            .with_causation_id("evt-0")
            .with_subject("auth-sub-456");

        assert_eq!(envelope.metadata.correlation_id, Some("req-123".to_string()));
        assert_eq!(envelope.metadata.causation_id, Some("evt-0".to_string()));
        assert_eq!(envelope.metadata.subject, Some("auth-sub-456".to_string()));
    }

    #[test]
    fn event_envelope_serialization_round_trip() {
        let envelope = EventEnvelope::new(
            "feedback.given",
            "feedback-123",
            "Feedback",
            json!({"message": "Great job today"}),
        )
        .with_correlation_id("req-456");

        let json = serde_json::to_string(&envelope).unwrap();
        let restored: EventEnvelope = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.event_id, envelope.event_id);
        assert_eq!(restored.event_type, envelope.event_type);
        assert_eq!(restored.aggregate_id, envelope.aggregate_id);
        assert_eq!(
            restored.metadata.correlation_id,
            envelope.metadata.correlation_id
        );
    }

    #[test]
    fn event_envelope_payload_as_deserializes() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct TestPayload {
            value: i32,
            name: String,
        }

        let envelope = EventEnvelope::new(
            "test.event",
            "agg-1",
            "Test",
            json!({"value": 42, "name": "test"}),
        );

        let payload: TestPayload = envelope.payload_as().unwrap();
        assert_eq!(payload.value, 42);
        assert_eq!(payload.name, "test");
    }

    #[test]
    fn event_envelope_payload_as_returns_error_on_mismatch() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct WrongPayload {
            missing_field: String,
        }

        let envelope =
            EventEnvelope::new("test.event", "agg-1", "Test", json!({"different": "data"}));

        let result: Result<WrongPayload, _> = envelope.payload_as();
        assert!(result.is_err());
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestTeamCreated {
        event_id: EventId,
        team_id: String,
        team_name: String,
        created_at: Timestamp,
    }

    domain_event!(
        TestTeamCreated,
        event_type = "test.team.created",
        aggregate_id = team_id,
        aggregate_type = "Team",
        occurred_at = created_at,
        event_id = event_id
    );

    #[test]
    fn domain_event_to_envelope_creates_valid_envelope() {
        let event = TestTeamCreated {
            event_id: EventId::from_string("evt-123"),
            team_id: "team-456".to_string(),
            team_name: "Pioneers".to_string(),
            created_at: Timestamp::now(),
        };

        let envelope = event.to_envelope();

        assert_eq!(envelope.event_id.as_str(), "evt-123");
        assert_eq!(envelope.event_type, "test.team.created");
        assert_eq!(envelope.aggregate_id, "team-456");
        assert_eq!(envelope.aggregate_type, "Team");
        assert_eq!(envelope.payload["team_name"], "Pioneers");
    }

    #[test]
    fn domain_event_to_envelope_payload_round_trips() {
        let event = TestTeamCreated {
            event_id: EventId::new(),
            team_id: "team-abc".to_string(),
            team_name: "Wanderers".to_string(),
            created_at: Timestamp::now(),
        };

        let envelope = event.to_envelope();
        let restored: TestTeamCreated = envelope.payload_as().unwrap();

        assert_eq!(restored.team_id, "team-abc");
        assert_eq!(restored.team_name, "Wanderers");
    }
}
