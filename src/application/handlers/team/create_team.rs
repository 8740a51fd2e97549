//! CreateTeamHandler - command handler for creating a peer's own team.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, PeerId, SerializableDomainEvent, TeamId, Timestamp,
};
use crate::domain::team::{Team, TeamKind, TeamName};
use crate::domain_event;
use crate::ports::{EventPublisher, PeerRepository, TeamRepository};

/// Command to create a team owned by the calling peer.
#[derive(Debug, Clone)]
pub struct CreateTeamCommand {
    pub subject: String,
    pub team_name: String,
    pub team_kind: String,
}

/// Result of successful team creation.
#[derive(Debug, Clone)]
pub struct CreateTeamResult {
    pub team: Team,
    pub event: TeamCreatedEvent,
}

/// Event published when a team is created.
///
/// Consumed by `AssignOwnTeamListener`, which sets the owner's `own_team`
/// backlink after this handler returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamCreatedEvent {
    pub event_id: EventId,
    pub team_id: TeamId,
    /// The owning peer.
    pub peer_id: PeerId,
    pub team_name: TeamName,
    pub team_kind: TeamKind,
    pub created_at: Timestamp,
}

domain_event!(
    TeamCreatedEvent,
    event_type = "team.created",
    aggregate_id = team_id,
    aggregate_type = "Team",
    occurred_at = created_at,
    event_id = event_id
);

/// Error type for team creation.
#[derive(Debug, Clone)]
pub enum CreateTeamError {
    PeerNotFound(String),
    Domain(DomainError),
}

impl std::fmt::Display for CreateTeamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateTeamError::PeerNotFound(subject) => {
                write!(f, "No peer for subject: {}", subject)
            }
            CreateTeamError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CreateTeamError {}

impl From<DomainError> for CreateTeamError {
    fn from(err: DomainError) -> Self {
        CreateTeamError::Domain(err)
    }
}

impl From<CreateTeamError> for DomainError {
    fn from(err: CreateTeamError) -> Self {
        match err {
            CreateTeamError::PeerNotFound(subject) => {
                DomainError::new(ErrorCode::PeerNotFound, "No profile for this account")
                    .with_detail("subject", subject)
            }
            CreateTeamError::Domain(err) => err,
        }
    }
}

/// Handler for creating teams.
pub struct CreateTeamHandler {
    peer_repository: Arc<dyn PeerRepository>,
    team_repository: Arc<dyn TeamRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateTeamHandler {
    pub fn new(
        peer_repository: Arc<dyn PeerRepository>,
        team_repository: Arc<dyn TeamRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            peer_repository,
            team_repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: CreateTeamCommand) -> Result<CreateTeamResult, CreateTeamError> {
        let owner = self
            .peer_repository
            .find_by_subject(&cmd.subject)
            .await?
            .ok_or_else(|| CreateTeamError::PeerNotFound(cmd.subject.clone()))?;

        let name = TeamName::new(cmd.team_name).map_err(DomainError::from)?;
        let kind = TeamKind::parse(&cmd.team_kind).map_err(DomainError::from)?;

        // Upsert keyed on the team name; a second create with the same name
        // replaces the row (documented last-writer-wins).
        let team = Team::new(name, kind, owner.clone());
        let saved = self.team_repository.save(&team).await?;

        let event = TeamCreatedEvent {
            event_id: EventId::new(),
            team_id: saved.id(),
            peer_id: owner.id(),
            team_name: saved.name().clone(),
            team_kind: saved.kind(),
            created_at: Timestamp::now(),
        };

        let envelope = event.to_envelope().with_subject(cmd.subject);
        self.event_publisher.publish(envelope).await?;

        Ok(CreateTeamResult { team: saved, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EventEnvelope;
    use crate::domain::peer::{Email, FirstName, LastName, Peer};
    use async_trait::async_trait;
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

    struct MockTeamRepository {
        teams: Mutex<Vec<Team>>,
    }

    #[async_trait]
    impl TeamRepository for MockTeamRepository {
        async fn save(&self, team: &Team) -> Result<Team, DomainError> {
            let mut teams = self.teams.lock().unwrap();
            teams.retain(|t| t.name() != team.name());
            teams.push(team.clone());
            Ok(team.clone())
        }

        async fn find_by_id(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
            Ok(self.teams.lock().unwrap().iter().find(|t| t.id() == id).cloned())
        }

        async fn find_by_name(&self, name: &TeamName) -> Result<Option<Team>, DomainError> {
            Ok(self
                .teams
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.name() == name)
                .cloned())
        }

        async fn find_by_owner(&self, owner_id: PeerId) -> Result<Option<Team>, DomainError> {
            Ok(self
                .teams
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.owner().id() == owner_id)
                .cloned())
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

    fn peer() -> Peer {
        Peer::new(
            FirstName::new("Amelia").unwrap(),
            LastName::new("Stone").unwrap(),
            Email::new("amelia@gmail.com").unwrap(),
            "auth-1",
            None,
        )
    }

    fn setup(
        peers: Vec<Peer>,
    ) -> (
        CreateTeamHandler,
        Arc<MockTeamRepository>,
        Arc<MockEventPublisher>,
    ) {
        let peer_repo = Arc::new(MockPeerRepository {
            peers: Mutex::new(peers),
        });
        let team_repo = Arc::new(MockTeamRepository {
            teams: Mutex::new(Vec::new()),
        });
        let publisher = Arc::new(MockEventPublisher {
            published: Mutex::new(Vec::new()),
        });
        let handler = CreateTeamHandler::new(peer_repo, team_repo.clone(), publisher.clone());
        (handler, team_repo, publisher)
    }

    fn command() -> CreateTeamCommand {
        CreateTeamCommand {
            subject: "auth-1".to_string(),
            team_name: "Pioneers".to_string(),
            team_kind: "family".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_team_and_publishes_event() {
        let owner = peer();
        let (handler, team_repo, publisher) = setup(vec![owner.clone()]);

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result.team.name().as_str(), "Pioneers");
        assert_eq!(result.team.owner().id(), owner.id());
        assert!(team_repo
            .find_by_name(result.team.name())
            .await
            .unwrap()
            .is_some());

        let events = publisher.published.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "team.created");
        assert_eq!(events[0].aggregate_id, result.team.id().to_string());
    }

    #[tokio::test]
    async fn event_carries_owner_for_backlink_listener() {
        let owner = peer();
        let (handler, _, publisher) = setup(vec![owner.clone()]);

        handler.handle(command()).await.unwrap();

        let events = publisher.published.lock().unwrap();
        let payload: TeamCreatedEvent = events[0].payload_as().unwrap();
        assert_eq!(payload.peer_id, owner.id());
        assert_eq!(payload.team_kind, TeamKind::Family);
    }

    #[tokio::test]
    async fn fails_for_unknown_peer() {
        let (handler, team_repo, publisher) = setup(Vec::new());

        let result = handler.handle(command()).await;

        assert!(matches!(result, Err(CreateTeamError::PeerNotFound(_))));
        assert!(team_repo.teams.lock().unwrap().is_empty());
        assert!(publisher.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_invalid_name_and_kind() {
        let (handler, _, _) = setup(vec![peer()]);

        let mut cmd = command();
        cmd.team_name = "Team One".to_string();
        assert!(handler.handle(cmd).await.is_err());

        let mut cmd = command();
        cmd.team_kind = "club".to_string();
        assert!(handler.handle(cmd).await.is_err());
    }
}
