//! Invitation aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, InvitationId, PeerId, Timestamp};
use crate::domain::peer::{Email, FirstName};
use crate::domain::team::TeamName;

use super::InviteSlug;

/// How long an invitation stays valid.
pub const INVITATION_TTL_DAYS: i64 = 7;

/// A single-use, expiring invitation to join a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    id: InvitationId,
    email: Email,
    slug: InviteSlug,
    team_name: TeamName,
    /// First name of the inviting team owner, shown in the invitation email.
    inviter_name: FirstName,
    team_owner_id: PeerId,
    created_at: Timestamp,
    expires_at: Timestamp,
    accepted_at: Option<Timestamp>,
}

impl Invitation {
    pub fn new(
        email: Email,
        team_name: TeamName,
        inviter_name: FirstName,
        team_owner_id: PeerId,
    ) -> Self {
        let created_at = Timestamp::now();
        Self {
            id: InvitationId::new(),
            email,
            slug: InviteSlug::generate(),
            team_name,
            inviter_name,
            team_owner_id,
            created_at,
            expires_at: created_at.plus_days(INVITATION_TTL_DAYS),
            accepted_at: None,
        }
    }

    /// Rebuilds an invitation from stored state.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: InvitationId,
        email: Email,
        slug: InviteSlug,
        team_name: TeamName,
        inviter_name: FirstName,
        team_owner_id: PeerId,
        created_at: Timestamp,
        expires_at: Timestamp,
        accepted_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            email,
            slug,
            team_name,
            inviter_name,
            team_owner_id,
            created_at,
            expires_at,
            accepted_at,
        }
    }

    pub fn id(&self) -> InvitationId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn slug(&self) -> &InviteSlug {
        &self.slug
    }

    pub fn team_name(&self) -> &TeamName {
        &self.team_name
    }

    pub fn inviter_name(&self) -> &FirstName {
        &self.inviter_name
    }

    pub fn team_owner_id(&self) -> PeerId {
        self.team_owner_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    pub fn accepted_at(&self) -> Option<Timestamp> {
        self.accepted_at
    }

    /// True once `now` has passed the expiry time.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.is_after(self.expires_at)
    }

    /// Marks the invitation accepted. Fails on expiry or repeat acceptance.
    pub fn accept(&mut self, now: Timestamp) -> Result<(), DomainError> {
        if self.is_expired(now) {
            return Err(DomainError::business_rule("Invitation has expired")
                .with_detail("slug", self.slug.as_str()));
        }
        if self.accepted_at.is_some() {
            return Err(
                DomainError::business_rule("Invitation has already been accepted")
                    .with_detail("slug", self.slug.as_str()),
            );
        }
        self.accepted_at = Some(now);
        Ok(())
    }
}
