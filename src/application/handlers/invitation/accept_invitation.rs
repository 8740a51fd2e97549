//! AcceptInvitationHandler - accepts an invitation by slug.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, InvitationId, PeerId, SerializableDomainEvent, Timestamp,
};
use crate::domain::invitation::{Invitation, InviteSlug};
use crate::domain::team::{Team, TeamName};
use crate::domain_event;
use crate::ports::{EventPublisher, InvitationRepository, PeerRepository, TeamRepository};

/// Command to accept an invitation.
#[derive(Debug, Clone)]
pub struct AcceptInvitationCommand {
    /// Auth subject of the accepting peer.
    pub subject: String,
    pub slug: String,
}

/// Result of a successful acceptance.
///
/// `team` is the inviter's team as stored right now; the acceptee is moved
/// from pending to members by a listener, so the view filters the acceptee
/// out of the pending list instead of waiting for that write.
#[derive(Debug, Clone)]
pub struct AcceptInvitationResult {
    pub invitation: Invitation,
    pub team: Team,
    pub event: InvitationAcceptedEvent,
}

/// Event published when an invitation is accepted.
///
/// Consumed by `RegisterAcceptedMemberListener`, which moves the acceptee
/// from the pending list to the member list and backlinks the team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationAcceptedEvent {
    pub event_id: EventId,
    pub invitation_id: InvitationId,
    pub acceptee_id: PeerId,
    /// The inviting team owner.
    pub inviter_id: PeerId,
    pub team_name: TeamName,
    pub accepted_at: Timestamp,
}

domain_event!(
    InvitationAcceptedEvent,
    event_type = "invitation.accepted",
    aggregate_id = invitation_id,
    aggregate_type = "Invitation",
    occurred_at = accepted_at,
    event_id = event_id
);

/// Error type for invitation acceptance.
#[derive(Debug, Clone)]
pub enum AcceptInvitationError {
    PeerNotFound(String),
    InvitationNotFound(String),
    Domain(DomainError),
}

impl std::fmt::Display for AcceptInvitationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcceptInvitationError::PeerNotFound(subject) => {
                write!(f, "No peer for subject: {}", subject)
            }
            AcceptInvitationError::InvitationNotFound(slug) => {
                write!(f, "Invitation not found: {}", slug)
            }
            AcceptInvitationError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AcceptInvitationError {}

impl From<DomainError> for AcceptInvitationError {
    fn from(err: DomainError) -> Self {
        AcceptInvitationError::Domain(err)
    }
}

impl From<AcceptInvitationError> for DomainError {
    fn from(err: AcceptInvitationError) -> Self {
        match err {
            AcceptInvitationError::PeerNotFound(subject) => {
                DomainError::new(ErrorCode::PeerNotFound, "No profile for this account")
                    .with_detail("subject", subject)
            }
            AcceptInvitationError::InvitationNotFound(slug) => {
                DomainError::new(ErrorCode::InvitationNotFound, "Invitation not found")
                    .with_detail("slug", slug)
            }
            AcceptInvitationError::Domain(err) => err,
        }
    }
}

/// Handler for accepting invitations.
pub struct AcceptInvitationHandler {
    peer_repository: Arc<dyn PeerRepository>,
    team_repository: Arc<dyn TeamRepository>,
    invitation_repository: Arc<dyn InvitationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AcceptInvitationHandler {
    pub fn new(
        peer_repository: Arc<dyn PeerRepository>,
        team_repository: Arc<dyn TeamRepository>,
        invitation_repository: Arc<dyn InvitationRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            peer_repository,
            team_repository,
            invitation_repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: AcceptInvitationCommand,
    ) -> Result<AcceptInvitationResult, AcceptInvitationError> {
        let acceptee = self
            .peer_repository
            .find_by_subject(&cmd.subject)
            .await?
            .ok_or_else(|| AcceptInvitationError::PeerNotFound(cmd.subject.clone()))?;

        let slug = InviteSlug::new(cmd.slug.clone()).map_err(DomainError::from)?;
        let mut invitation = self
            .invitation_repository
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| AcceptInvitationError::InvitationNotFound(cmd.slug.clone()))?;

        let accepted_at = Timestamp::now();
        invitation.accept(accepted_at)?;
        let saved = self.invitation_repository.save(&invitation).await?;

        let team = self
            .team_repository
            .find_by_owner(saved.team_owner_id())
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::TeamNotFound, "Inviting team no longer exists")
                    .with_detail("slug", slug.as_str())
            })?;

        let event = InvitationAcceptedEvent {
            event_id: EventId::new(),
            invitation_id: saved.id(),
            acceptee_id: acceptee.id(),
            inviter_id: saved.team_owner_id(),
            team_name: saved.team_name().clone(),
            accepted_at,
        };

        let envelope = event.to_envelope().with_subject(cmd.subject);
        self.event_publisher.publish(envelope).await?;

        // The listener removes the pending entry; present the team as it
        // will look once that write lands.
        let mut team_view = team;
        team_view.remove_pending_member(saved.id());

        Ok(AcceptInvitationResult {
            invitation: saved,
            team: team_view,
            event,
        })
    }
}
