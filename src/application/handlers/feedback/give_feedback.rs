//! GiveFeedbackHandler - records one peer's feedback for another.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::feedback::{Feedback, FeedbackMessage};
use crate::domain::foundation::{
    DomainError, DomainEvent, ErrorCode, EventId, FeedbackId, PeerId, SerializableDomainEvent,
    TeamId, Timestamp,
};
use crate::domain_event;
use crate::ports::{EventPublisher, FeedbackRepository, OutboxStore, PeerRepository};

/// Command to give feedback to another peer.
#[derive(Debug, Clone)]
pub struct GiveFeedbackCommand {
    /// Auth subject of the giving peer.
    pub subject: String,
    pub to_peer_id: PeerId,
    pub message: String,
}

/// Result of successfully given feedback.
#[derive(Debug, Clone)]
pub struct GiveFeedbackResult {
    pub feedback: Feedback,
    pub event: FeedbackGivenEvent,
}

/// Event type for given feedback, as recorded in the outbox.
pub const FEEDBACK_GIVEN: &str = "feedback.given";

/// Event published when feedback is given.
///
/// Consumed in-process by `TeamFeedbackProjectionListener`; also recorded to
/// the outbox so the classification workflow survives restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackGivenEvent {
    pub event_id: EventId,
    pub feedback_id: FeedbackId,
    pub team_id: TeamId,
    pub from_member_id: PeerId,
    pub to_member_id: PeerId,
    pub message: String,
    pub created_at: Timestamp,
}

domain_event!(
    FeedbackGivenEvent,
    event_type = FEEDBACK_GIVEN,
    aggregate_id = feedback_id,
    aggregate_type = "Feedback",
    occurred_at = created_at,
    event_id = event_id
);

/// Error type for giving feedback.
#[derive(Debug, Clone)]
pub enum GiveFeedbackError {
    GiverNotFound(String),
    ReceiverNotFound(PeerId),
    /// Neither the giver nor the receiver owns a team to attribute the
    /// feedback to.
    NoTeamContext,
    Domain(DomainError),
}

impl std::fmt::Display for GiveFeedbackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GiveFeedbackError::GiverNotFound(subject) => {
                write!(f, "No peer for subject: {}", subject)
            }
            GiveFeedbackError::ReceiverNotFound(id) => write!(f, "Receiver not found: {}", id),
            GiveFeedbackError::NoTeamContext => {
                write!(f, "Neither peer owns a team to attribute feedback to")
            }
            GiveFeedbackError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GiveFeedbackError {}

impl From<DomainError> for GiveFeedbackError {
    fn from(err: DomainError) -> Self {
        GiveFeedbackError::Domain(err)
    }
}

impl From<GiveFeedbackError> for DomainError {
    fn from(err: GiveFeedbackError) -> Self {
        match err {
            GiveFeedbackError::GiverNotFound(subject) => {
                DomainError::new(ErrorCode::PeerNotFound, "No profile for this account")
                    .with_detail("subject", subject)
            }
            GiveFeedbackError::ReceiverNotFound(id) => {
                DomainError::new(ErrorCode::PeerNotFound, "Receiving peer not found")
                    .with_detail("peerId", id.to_string())
            }
            GiveFeedbackError::NoTeamContext => DomainError::business_rule(
                "Neither peer owns a team to attribute feedback to",
            ),
            GiveFeedbackError::Domain(err) => err,
        }
    }
}

/// Handler for giving feedback.
pub struct GiveFeedbackHandler {
    peer_repository: Arc<dyn PeerRepository>,
    feedback_repository: Arc<dyn FeedbackRepository>,
    outbox_store: Arc<dyn OutboxStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl GiveFeedbackHandler {
    pub fn new(
        peer_repository: Arc<dyn PeerRepository>,
        feedback_repository: Arc<dyn FeedbackRepository>,
        outbox_store: Arc<dyn OutboxStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            peer_repository,
            feedback_repository,
            outbox_store,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: GiveFeedbackCommand,
    ) -> Result<GiveFeedbackResult, GiveFeedbackError> {
        let giver = self
            .peer_repository
            .find_by_subject(&cmd.subject)
            .await?
            .ok_or_else(|| GiveFeedbackError::GiverNotFound(cmd.subject.clone()))?;

        let receiver = self
            .peer_repository
            .find_by_id(cmd.to_peer_id)
            .await?
            .ok_or(GiveFeedbackError::ReceiverNotFound(cmd.to_peer_id))?;

        // Attribution: giver's own team wins, then the receiver's.
        let team = giver
            .own_team()
            .or_else(|| receiver.own_team())
            .ok_or(GiveFeedbackError::NoTeamContext)?
            .clone();

        let message = FeedbackMessage::new(cmd.message).map_err(DomainError::from)?;
        let feedback = Feedback::new(team.id, giver.clone(), receiver, message);

        // Save, then record durably, then publish. The in-process publish may
        // race a crash; the outbox row is what guarantees classification.
        let saved = self.feedback_repository.save(&feedback).await?;

        let event = FeedbackGivenEvent {
            event_id: EventId::new(),
            feedback_id: saved.id(),
            team_id: saved.team_id(),
            from_member_id: giver.id(),
            to_member_id: saved.to_member().id(),
            message: saved.message().as_str().to_string(),
            created_at: saved.created_at(),
        };

        let payload = serde_json::to_value(&event)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        self.outbox_store
            .record(event.event_type(), payload)
            .await?;

        let envelope = event.to_envelope().with_subject(cmd.subject);
        self.event_publisher.publish(envelope).await?;

        Ok(GiveFeedbackResult {
            feedback: saved,
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventEnvelope, OutboxMessageId};
    use crate::domain::peer::{Email, FirstName, LastName, Peer, TeamLink};
    use crate::domain::team::{TeamKind, TeamName};
    use crate::ports::OutboxMessage;
    use async_trait::async_trait;
    use serde_json::Value as JsonValue;
    use std::sync::Mutex;

    struct MockPeerRepository {
        peers: Mutex<Vec<Peer>>,
    }

    #[async_trait]
    impl PeerRepository for MockPeerRepository {
        async fn save(&self, peer: &Peer) -> Result<Peer, DomainError> {
            self.peers.lock().unwrap().push(peer.clone());
            Ok(peer.clone())
        }

        async fn find_by_id(&self, id: PeerId) -> Result<Option<Peer>, DomainError> {
            Ok(self.peers.lock().unwrap().iter().find(|p| p.id() == id).cloned())
        }

        async fn find_by_subject(&self, subject: &str) -> Result<Option<Peer>, DomainError> {
            Ok(self
                .peers
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.subject() == subject)
                .cloned())
        }
    }

    struct MockFeedbackRepository {
        feedbacks: Mutex<Vec<Feedback>>,
    }

    #[async_trait]
    impl FeedbackRepository for MockFeedbackRepository {
        async fn save(&self, feedback: &Feedback) -> Result<Feedback, DomainError> {
            self.feedbacks.lock().unwrap().push(feedback.clone());
            Ok(feedback.clone())
        }

        async fn find_by_id(&self, id: FeedbackId) -> Result<Option<Feedback>, DomainError> {
            Ok(self
                .feedbacks
                .lock()
                .unwrap()
                .iter()
                .find(|f| f.id() == id)
                .cloned())
        }
    }

    struct MockOutboxStore {
        messages: Mutex<Vec<OutboxMessage>>,
    }

    #[async_trait]
    impl OutboxStore for MockOutboxStore {
        async fn record(
            &self,
            event_type: &str,
            payload: JsonValue,
        ) -> Result<OutboxMessage, DomainError> {
            let msg = OutboxMessage::new(event_type, payload);
            self.messages.lock().unwrap().push(msg.clone());
            Ok(msg)
        }

        async fn fetch_unprocessed(&self) -> Result<Vec<OutboxMessage>, DomainError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| !m.processed)
                .cloned()
                .collect())
        }

        async fn find_by_id(
            &self,
            id: OutboxMessageId,
        ) -> Result<Option<OutboxMessage>, DomainError> {
            Ok(self.messages.lock().unwrap().iter().find(|m| m.id == id).cloned())
        }

        async fn mark_processed(&self, id: OutboxMessageId) -> Result<(), DomainError> {
            for msg in self.messages.lock().unwrap().iter_mut() {
                if msg.id == id {
                    msg.processed = true;
                }
            }
            Ok(())
        }
    }

    struct MockEventPublisher {
        published: Mutex<Vec<EventEnvelope>>,
    }

    #[async_trait]
    impl EventPublisher for MockEventPublisher {
        async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
            self.published.lock().unwrap().push(event);
            Ok(())
        }

        async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
            for event in events {
                self.publish(event).await?;
            }
            Ok(())
        }
    }

    fn team_link() -> TeamLink {
        TeamLink {
            id: TeamId::new(),
            name: TeamName::new("Pioneers").unwrap(),
            kind: TeamKind::Family,
        }
    }

    fn peer(first: &str, subject: &str, own_team: Option<TeamLink>) -> Peer {
        let mut peer = Peer::new(
            FirstName::new(first).unwrap(),
            LastName::new("Stone").unwrap(),
            Email::new(format!("{}@gmail.com", first.to_lowercase())).unwrap(),
            subject,
            None,
        );
        if let Some(team) = own_team {
            peer.assign_own_team(team);
        }
        peer
    }

    struct Setup {
        handler: GiveFeedbackHandler,
        outbox: Arc<MockOutboxStore>,
        publisher: Arc<MockEventPublisher>,
    }

    fn setup(peers: Vec<Peer>) -> Setup {
        let outbox = Arc::new(MockOutboxStore {
            messages: Mutex::new(Vec::new()),
        });
        let publisher = Arc::new(MockEventPublisher {
            published: Mutex::new(Vec::new()),
        });
        let handler = GiveFeedbackHandler::new(
            Arc::new(MockPeerRepository {
                peers: Mutex::new(peers),
            }),
            Arc::new(MockFeedbackRepository {
                feedbacks: Mutex::new(Vec::new()),
            }),
            outbox.clone(),
            publisher.clone(),
        );
        Setup {
            handler,
            outbox,
            publisher,
        }
    }

    #[tokio::test]
    async fn saves_records_and_publishes() {
        let giver = peer("Amelia", "auth-1", Some(team_link()));
        let receiver = peer("Ben", "auth-2", None);
        let receiver_id = receiver.id();
        let s = setup(vec![giver, receiver]);

        let result = s
            .handler
            .handle(GiveFeedbackCommand {
                subject: "auth-1".to_string(),
                to_peer_id: receiver_id,
                message: "Great job today".to_string(),
            })
            .await
            .unwrap();

        let messages = s.outbox.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].event_type, "feedback.given");
        assert!(!messages[0].processed);

        let events = s.publisher.published.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "feedback.given");
        assert_eq!(events[0].aggregate_id, result.feedback.id().to_string());
    }

    #[tokio::test]
    async fn giver_team_wins_over_receiver_team() {
        let giver_team = team_link();
        let receiver_team = team_link();
        let giver = peer("Amelia", "auth-1", Some(giver_team.clone()));
        let receiver = peer("Ben", "auth-2", Some(receiver_team));
        let receiver_id = receiver.id();
        let s = setup(vec![giver, receiver]);

        let result = s
            .handler
            .handle(GiveFeedbackCommand {
                subject: "auth-1".to_string(),
                to_peer_id: receiver_id,
                message: "Great job today".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.feedback.team_id(), giver_team.id);
    }

    #[tokio::test]
    async fn falls_back_to_receiver_team() {
        let receiver_team = team_link();
        let giver = peer("Amelia", "auth-1", None);
        let receiver = peer("Ben", "auth-2", Some(receiver_team.clone()));
        let receiver_id = receiver.id();
        let s = setup(vec![giver, receiver]);

        let result = s
            .handler
            .handle(GiveFeedbackCommand {
                subject: "auth-1".to_string(),
                to_peer_id: receiver_id,
                message: "Great job today".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.feedback.team_id(), receiver_team.id);
    }

    #[tokio::test]
    async fn fails_without_any_team_context() {
        let giver = peer("Amelia", "auth-1", None);
        let receiver = peer("Ben", "auth-2", None);
        let receiver_id = receiver.id();
        let s = setup(vec![giver, receiver]);

        let result = s
            .handler
            .handle(GiveFeedbackCommand {
                subject: "auth-1".to_string(),
                to_peer_id: receiver_id,
                message: "Great job today".to_string(),
            })
            .await;

        assert!(matches!(result, Err(GiveFeedbackError::NoTeamContext)));
        assert!(s.outbox.messages.lock().unwrap().is_empty());
        assert!(s.publisher.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_too_short_message() {
        let giver = peer("Amelia", "auth-1", Some(team_link()));
        let receiver = peer("Ben", "auth-2", None);
        let receiver_id = receiver.id();
        let s = setup(vec![giver, receiver]);

        let result = s
            .handler
            .handle(GiveFeedbackCommand {
                subject: "auth-1".to_string(),
                to_peer_id: receiver_id,
                message: "Hi there".to_string(),
            })
            .await;

        assert!(result.is_err());
        assert!(s.outbox.messages.lock().unwrap().is_empty());
    }
}
