//! GetInvitationHandler - resolves an invitation by its slug.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::invitation::{Invitation, InviteSlug};
use crate::ports::InvitationRepository;

/// Query for an invitation by slug.
#[derive(Debug, Clone)]
pub struct GetInvitationQuery {
    pub slug: String,
}

pub struct GetInvitationHandler {
    invitation_repository: Arc<dyn InvitationRepository>,
}

impl GetInvitationHandler {
    pub fn new(invitation_repository: Arc<dyn InvitationRepository>) -> Self {
        Self {
            invitation_repository,
        }
    }

    pub async fn handle(&self, query: GetInvitationQuery) -> Result<Invitation, DomainError> {
        let slug = InviteSlug::new(query.slug)?;
        let invitation = self
            .invitation_repository
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::InvitationNotFound, "Invitation not found")
                    .with_detail("slug", slug.as_str())
            })?;

        if invitation.is_expired(Timestamp::now()) {
            return Err(DomainError::business_rule("Invitation has expired")
                .with_detail("slug", slug.as_str()));
        }

        Ok(invitation)
    }
}
