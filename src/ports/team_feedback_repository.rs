//! TeamFeedbackRepository port - write/read side of the feedback projection.

use async_trait::async_trait;

use crate::domain::feedback::TeamFeedback;
use crate::domain::foundation::{DomainError, TeamId};

/// Port for the denormalized team feedback read model.
#[async_trait]
pub trait TeamFeedbackRepository: Send + Sync {
    /// Appends one projected row.
    async fn save(&self, row: &TeamFeedback) -> Result<(), DomainError>;

    /// Most recent rows for a team, newest first.
    async fn list_for_team(
        &self,
        team_id: TeamId,
        limit: u32,
    ) -> Result<Vec<TeamFeedback>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn TeamFeedbackRepository) {}
}
