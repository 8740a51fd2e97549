//! GetTeamFeedbackHandler - recent feedback for a team from the projection.

use std::sync::Arc;

use crate::domain::feedback::TeamFeedback;
use crate::domain::foundation::{DomainError, TeamId};
use crate::ports::TeamFeedbackRepository;

/// Default page size when the caller does not pass a limit.
pub const DEFAULT_FEEDBACK_LIMIT: u32 = 10;

/// Query for a team's recent feedback.
#[derive(Debug, Clone)]
pub struct GetTeamFeedbackQuery {
    pub team_id: TeamId,
    pub limit: Option<u32>,
}

pub struct GetTeamFeedbackHandler {
    team_feedback_repository: Arc<dyn TeamFeedbackRepository>,
}

impl GetTeamFeedbackHandler {
    pub fn new(team_feedback_repository: Arc<dyn TeamFeedbackRepository>) -> Self {
        Self {
            team_feedback_repository,
        }
    }

    pub async fn handle(
        &self,
        query: GetTeamFeedbackQuery,
    ) -> Result<Vec<TeamFeedback>, DomainError> {
        let limit = query.limit.unwrap_or(DEFAULT_FEEDBACK_LIMIT);
        self.team_feedback_repository
            .list_for_team(query.team_id, limit)
            .await
    }
}
