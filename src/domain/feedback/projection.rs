//! Denormalized team feedback read model.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FeedbackId, PeerId, TeamId, Timestamp};
use crate::domain::team::TeamKind;

use super::Feedback;

/// Flattened row for the team feedback list. Member names are captured at
/// write time so later profile edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFeedback {
    pub feedback_id: FeedbackId,
    pub team_id: TeamId,
    pub team_name: String,
    pub team_kind: TeamKind,
    pub from_member_id: PeerId,
    pub from_member_name: String,
    pub to_member_id: PeerId,
    pub to_member_name: String,
    pub message: String,
    pub created_at: Timestamp,
}

impl TeamFeedback {
    /// Projects a feedback aggregate into the read model.
    pub fn project(feedback: &Feedback, team_name: &str, team_kind: TeamKind) -> Self {
        let from = feedback.from_member();
        let to = feedback.to_member();
        Self {
            feedback_id: feedback.id(),
            team_id: feedback.team_id(),
            team_name: team_name.to_string(),
            team_kind,
            from_member_id: from.id(),
            from_member_name: format!("{} {}", from.first_name(), from.last_name()),
            to_member_id: to.id(),
            to_member_name: format!("{} {}", to.first_name(), to.last_name()),
            message: feedback.message().as_str().to_string(),
            created_at: feedback.created_at(),
        }
    }
}
