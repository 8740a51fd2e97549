//! Reacts to `invitation.accepted`: moves the acceptee from the pending
//! list to the member list and backlinks the team on the acceptee.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::handlers::invitation::InvitationAcceptedEvent;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, PeerRepository, TeamRepository};

pub struct RegisterAcceptedMemberListener {
    peer_repository: Arc<dyn PeerRepository>,
    team_repository: Arc<dyn TeamRepository>,
}

impl RegisterAcceptedMemberListener {
    pub fn new(
        peer_repository: Arc<dyn PeerRepository>,
        team_repository: Arc<dyn TeamRepository>,
    ) -> Self {
        Self {
            peer_repository,
            team_repository,
        }
    }
}

#[async_trait]
impl EventHandler for RegisterAcceptedMemberListener {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let payload: InvitationAcceptedEvent = event
            .payload_as()
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        let mut acceptee = self
            .peer_repository
            .find_by_id(payload.acceptee_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PeerNotFound, "Accepting peer no longer exists")
                    .with_detail("peerId", payload.acceptee_id.to_string())
            })?;

        let mut team = self
            .team_repository
            .find_by_owner(payload.inviter_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::TeamNotFound, "Inviting team no longer exists")
                    .with_detail("ownerId", payload.inviter_id.to_string())
            })?;

        team.remove_pending_member(payload.invitation_id);
        team.add_member(acceptee.clone());
        let saved_team = self.team_repository.save(&team).await?;

        acceptee.add_invited_team(saved_team.link());
        self.peer_repository.save(&acceptee).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RegisterAcceptedMemberListener"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{
        EventId, InvitationId, PeerId, SerializableDomainEvent, TeamId, Timestamp,
    };
    use crate::domain::invitation::Invitation;
    use crate::domain::peer::{Email, FirstName, LastName, Peer};
    use crate::domain::team::{Team, TeamKind, TeamName};
    use std::sync::Mutex;

    struct MockPeerRepository {
        peers: Mutex<Vec<Peer>>,
    }

    #[async_trait]
    impl PeerRepository for MockPeerRepository {
        async fn save(&self, peer: &Peer) -> Result<Peer, DomainError> {
            let mut peers = self.peers.lock().unwrap();
            peers.retain(|p| p.id() != peer.id());
            peers.push(peer.clone());
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
            teams.retain(|t| t.id() != team.id());
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

    fn peer(first: &str, subject: &str) -> Peer {
        Peer::new(
            FirstName::new(first).unwrap(),
            LastName::new("Stone").unwrap(),
            Email::new(format!("{}@gmail.com", first.to_lowercase())).unwrap(),
            subject,
            None,
        )
    }

    #[tokio::test]
    async fn moves_acceptee_from_pending_to_members() {
        let owner = peer("Amelia", "auth-1");
        let acceptee = peer("Ben", "auth-2");
        let invitation = Invitation::new(
            acceptee.email().clone(),
            TeamName::new("Pioneers").unwrap(),
            owner.first_name().clone(),
            owner.id(),
        );
        let mut team = Team::new(
            TeamName::new("Pioneers").unwrap(),
            TeamKind::Family,
            owner.clone(),
        );
        team.add_pending_member(invitation.clone());

        let peer_repo = Arc::new(MockPeerRepository {
            peers: Mutex::new(vec![owner.clone(), acceptee.clone()]),
        });
        let team_repo = Arc::new(MockTeamRepository {
            teams: Mutex::new(vec![team.clone()]),
        });
        let listener = RegisterAcceptedMemberListener::new(peer_repo.clone(), team_repo.clone());

        let event = InvitationAcceptedEvent {
            event_id: EventId::new(),
            invitation_id: invitation.id(),
            acceptee_id: acceptee.id(),
            inviter_id: owner.id(),
            team_name: team.name().clone(),
            accepted_at: Timestamp::now(),
        };

        listener.handle(event.to_envelope()).await.unwrap();

        let stored_team = team_repo.find_by_id(team.id()).await.unwrap().unwrap();
        assert!(stored_team.pending_members().is_empty());
        assert_eq!(stored_team.members().len(), 1);
        assert_eq!(stored_team.members()[0].id(), acceptee.id());

        let stored_peer = peer_repo.find_by_id(acceptee.id()).await.unwrap().unwrap();
        assert_eq!(stored_peer.invited_teams().len(), 1);
        assert_eq!(stored_peer.invited_teams()[0].id, team.id());
    }

    #[tokio::test]
    async fn repeat_delivery_is_idempotent() {
        let owner = peer("Amelia", "auth-1");
        let acceptee = peer("Ben", "auth-2");
        let team = Team::new(
            TeamName::new("Pioneers").unwrap(),
            TeamKind::Family,
            owner.clone(),
        );

        let peer_repo = Arc::new(MockPeerRepository {
            peers: Mutex::new(vec![owner.clone(), acceptee.clone()]),
        });
        let team_repo = Arc::new(MockTeamRepository {
            teams: Mutex::new(vec![team.clone()]),
        });
        let listener = RegisterAcceptedMemberListener::new(peer_repo.clone(), team_repo.clone());

        let event = InvitationAcceptedEvent {
            event_id: EventId::new(),
            invitation_id: InvitationId::new(),
            acceptee_id: acceptee.id(),
            inviter_id: owner.id(),
            team_name: team.name().clone(),
            accepted_at: Timestamp::now(),
        };

        listener.handle(event.to_envelope()).await.unwrap();
        listener.handle(event.to_envelope()).await.unwrap();

        let stored_team = team_repo.find_by_id(team.id()).await.unwrap().unwrap();
        assert_eq!(stored_team.members().len(), 1);
        let stored_peer = peer_repo.find_by_id(acceptee.id()).await.unwrap().unwrap();
        assert_eq!(stored_peer.invited_teams().len(), 1);
    }
}
