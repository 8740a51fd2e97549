//! Reacts to `invitation.sent`: records the invitation on the team's
//! pending member list.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::handlers::invitation::InvitationSentEvent;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, InvitationRepository, TeamRepository};

pub struct AddPendingMemberListener {
    team_repository: Arc<dyn TeamRepository>,
    invitation_repository: Arc<dyn InvitationRepository>,
}

impl AddPendingMemberListener {
    pub fn new(
        team_repository: Arc<dyn TeamRepository>,
        invitation_repository: Arc<dyn InvitationRepository>,
    ) -> Self {
        Self {
            team_repository,
            invitation_repository,
        }
    }
}

#[async_trait]
impl EventHandler for AddPendingMemberListener {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let payload: InvitationSentEvent = event
            .payload_as()
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        let invitation = self
            .invitation_repository
            .find_by_id(payload.invitation_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::InvitationNotFound, "Invitation not found")
                    .with_detail("invitationId", payload.invitation_id.to_string())
            })?;

        let mut team = self
            .team_repository
            .find_by_owner(payload.peer_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::TeamNotFound, "Inviting team no longer exists")
                    .with_detail("ownerId", payload.peer_id.to_string())
            })?;

        team.add_pending_member(invitation);
        self.team_repository.save(&team).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "AddPendingMemberListener"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{
        EventId, InvitationId, PeerId, SerializableDomainEvent, TeamId, Timestamp,
    };
    use crate::domain::invitation::{Invitation, InviteSlug};
    use crate::domain::peer::{Email, FirstName, LastName, Peer};
    use crate::domain::team::{Team, TeamKind, TeamName};
    use std::sync::Mutex;

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

    struct MockInvitationRepository {
        invitations: Mutex<Vec<Invitation>>,
    }

    #[async_trait]
    impl InvitationRepository for MockInvitationRepository {
        async fn save(&self, invitation: &Invitation) -> Result<Invitation, DomainError> {
            self.invitations.lock().unwrap().push(invitation.clone());
            Ok(invitation.clone())
        }

        async fn find_by_id(&self, id: InvitationId) -> Result<Option<Invitation>, DomainError> {
            Ok(self
                .invitations
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id() == id)
                .cloned())
        }

        async fn find_by_slug(&self, slug: &InviteSlug) -> Result<Option<Invitation>, DomainError> {
            Ok(self
                .invitations
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.slug() == slug)
                .cloned())
        }
    }

    #[tokio::test]
    async fn adds_invitation_to_pending_members() {
        let owner = Peer::new(
            FirstName::new("Amelia").unwrap(),
            LastName::new("Stone").unwrap(),
            Email::new("amelia@gmail.com").unwrap(),
            "auth-1",
            None,
        );
        let team = Team::new(
            TeamName::new("Pioneers").unwrap(),
            TeamKind::Family,
            owner.clone(),
        );
        let invitation = Invitation::new(
            Email::new("ben@gmail.com").unwrap(),
            team.name().clone(),
            owner.first_name().clone(),
            owner.id(),
        );

        let team_repo = Arc::new(MockTeamRepository {
            teams: Mutex::new(vec![team.clone()]),
        });
        let listener = AddPendingMemberListener::new(
            team_repo.clone(),
            Arc::new(MockInvitationRepository {
                invitations: Mutex::new(vec![invitation.clone()]),
            }),
        );

        let event = InvitationSentEvent {
            event_id: EventId::new(),
            invitation_id: invitation.id(),
            peer_id: owner.id(),
            team_name: team.name().clone(),
            email: invitation.email().clone(),
            slug: invitation.slug().clone(),
            expires_at: invitation.expires_at(),
            sent_at: Timestamp::now(),
        };

        listener.handle(event.to_envelope()).await.unwrap();

        let stored = team_repo.find_by_id(team.id()).await.unwrap().unwrap();
        assert_eq!(stored.pending_members().len(), 1);
        assert_eq!(stored.pending_members()[0].id(), invitation.id());
    }
}
