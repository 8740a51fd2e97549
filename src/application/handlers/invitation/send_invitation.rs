//! SendInvitationHandler - invites an email address into the caller's team.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, InvitationId, PeerId, SerializableDomainEvent, Timestamp,
};
use crate::domain::invitation::{Invitation, InviteSlug};
use crate::domain::peer::Email;
use crate::domain::team::TeamName;
use crate::domain_event;
use crate::ports::{
    EventPublisher, InvitationEmailPolicy, InvitationMail, InvitationRepository, Mailer,
    PeerRepository, TeamRepository,
};

/// Command to send a team invitation.
#[derive(Debug, Clone)]
pub struct SendInvitationCommand {
    /// Auth subject of the inviting team owner.
    pub subject: String,
    /// Address to invite.
    pub email: String,
}

/// Result of a successful invitation.
#[derive(Debug, Clone)]
pub struct SendInvitationResult {
    pub invitation: Invitation,
    pub event: InvitationSentEvent,
}

/// Event published when an invitation is sent.
///
/// Consumed by `AddPendingMemberListener`, which records the invitation on
/// the team's pending list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationSentEvent {
    pub event_id: EventId,
    pub invitation_id: InvitationId,
    /// The inviting team owner.
    pub peer_id: PeerId,
    pub team_name: TeamName,
    pub email: Email,
    pub slug: InviteSlug,
    pub expires_at: Timestamp,
    pub sent_at: Timestamp,
}

domain_event!(
    InvitationSentEvent,
    event_type = "invitation.sent",
    aggregate_id = invitation_id,
    aggregate_type = "Invitation",
    occurred_at = sent_at,
    event_id = event_id
);

/// Error type for sending invitations.
#[derive(Debug, Clone)]
pub enum SendInvitationError {
    PeerNotFound(String),
    /// The caller owns no team to invite into.
    NoOwnTeam(PeerId),
    Domain(DomainError),
}

impl std::fmt::Display for SendInvitationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendInvitationError::PeerNotFound(subject) => {
                write!(f, "No peer for subject: {}", subject)
            }
            SendInvitationError::NoOwnTeam(peer_id) => {
                write!(f, "Peer {} owns no team to invite into", peer_id)
            }
            SendInvitationError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SendInvitationError {}

impl From<DomainError> for SendInvitationError {
    fn from(err: DomainError) -> Self {
        SendInvitationError::Domain(err)
    }
}

impl From<SendInvitationError> for DomainError {
    fn from(err: SendInvitationError) -> Self {
        match err {
            SendInvitationError::PeerNotFound(subject) => {
                DomainError::new(ErrorCode::PeerNotFound, "No profile for this account")
                    .with_detail("subject", subject)
            }
            SendInvitationError::NoOwnTeam(peer_id) => {
                DomainError::business_rule("You must own a team to send invitations")
                    .with_detail("peerId", peer_id.to_string())
            }
            SendInvitationError::Domain(err) => err,
        }
    }
}

/// Handler for sending invitations.
pub struct SendInvitationHandler {
    peer_repository: Arc<dyn PeerRepository>,
    team_repository: Arc<dyn TeamRepository>,
    invitation_repository: Arc<dyn InvitationRepository>,
    email_policy: Arc<dyn InvitationEmailPolicy>,
    event_publisher: Arc<dyn EventPublisher>,
    mailer: Arc<dyn Mailer>,
    /// When false, the invitation email is skipped entirely.
    mail_enabled: bool,
}

impl SendInvitationHandler {
    pub fn new(
        peer_repository: Arc<dyn PeerRepository>,
        team_repository: Arc<dyn TeamRepository>,
        invitation_repository: Arc<dyn InvitationRepository>,
        email_policy: Arc<dyn InvitationEmailPolicy>,
        event_publisher: Arc<dyn EventPublisher>,
        mailer: Arc<dyn Mailer>,
        mail_enabled: bool,
    ) -> Self {
        Self {
            peer_repository,
            team_repository,
            invitation_repository,
            email_policy,
            event_publisher,
            mailer,
            mail_enabled,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendInvitationCommand,
    ) -> Result<SendInvitationResult, SendInvitationError> {
        let sender = self
            .peer_repository
            .find_by_subject(&cmd.subject)
            .await?
            .ok_or_else(|| SendInvitationError::PeerNotFound(cmd.subject.clone()))?;

        let team = self
            .team_repository
            .find_by_owner(sender.id())
            .await?
            .ok_or(SendInvitationError::NoOwnTeam(sender.id()))?;

        let email = Email::new(cmd.email).map_err(DomainError::from)?;

        // Policy gate before anything is written.
        self.email_policy.check(&email)?;

        let invitation = Invitation::new(
            email.clone(),
            team.name().clone(),
            sender.first_name().clone(),
            sender.id(),
        );
        let saved = self.invitation_repository.save(&invitation).await?;

        let event = InvitationSentEvent {
            event_id: EventId::new(),
            invitation_id: saved.id(),
            peer_id: sender.id(),
            team_name: saved.team_name().clone(),
            email: saved.email().clone(),
            slug: saved.slug().clone(),
            expires_at: saved.expires_at(),
            sent_at: Timestamp::now(),
        };

        let envelope = event.to_envelope().with_subject(cmd.subject);
        self.event_publisher.publish(envelope).await?;

        // Email delivery is best-effort and never rolls back the invitation.
        if self.mail_enabled {
            let mail = InvitationMail {
                recipient: email,
                inviter_name: sender.first_name().to_string(),
                team_name: team.name().to_string(),
                invite_slug: saved.slug().to_string(),
            };
            if let Err(err) = self.mailer.send_invitation(&mail).await {
                warn!(
                    invitation_id = %saved.id(),
                    error = %err,
                    "invitation email failed, invitation kept"
                );
            }
        } else {
            info!(invitation_id = %saved.id(), "invitation email disabled, skipping send");
        }

        Ok(SendInvitationResult {
            invitation: saved,
            event,
        })
    }
}
