//! TeamRepository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PeerId, TeamId};
use crate::domain::team::{Team, TeamName};

/// Port for team persistence.
///
/// `save` upserts keyed on the team name. Two concurrent creates with the
/// same name therefore resolve last-writer-wins at the row level; callers
/// treat this as accepted behavior rather than a conflict.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Upserts the team by name and returns the stored state.
    async fn save(&self, team: &Team) -> Result<Team, DomainError>;

    async fn find_by_id(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    async fn find_by_name(&self, name: &TeamName) -> Result<Option<Team>, DomainError>;

    /// The team a peer owns, if any.
    async fn find_by_owner(&self, owner_id: PeerId) -> Result<Option<Team>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn TeamRepository) {}
}
