//! InvitationRepository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InvitationId};
use crate::domain::invitation::{Invitation, InviteSlug};

/// Port for invitation persistence.
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Inserts or updates the invitation and returns the stored state.
    async fn save(&self, invitation: &Invitation) -> Result<Invitation, DomainError>;

    async fn find_by_id(&self, id: InvitationId) -> Result<Option<Invitation>, DomainError>;

    async fn find_by_slug(&self, slug: &InviteSlug) -> Result<Option<Invitation>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn InvitationRepository) {}
}
