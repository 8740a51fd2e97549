//! Request and response types for feedback endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::feedback::{Feedback, TeamFeedback};
use crate::domain::foundation::PeerId;

#[derive(Debug, Clone, Deserialize)]
pub struct GiveFeedbackRequest {
    pub to_peer_id: PeerId,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationDto {
    pub category: String,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub id: String,
    pub team_id: String,
    pub from_peer_id: String,
    pub to_peer_id: String,
    pub message: String,
    pub created_at: String,
    /// Absent until the async classifier has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationDto>,
}

impl From<&Feedback> for FeedbackResponse {
    fn from(feedback: &Feedback) -> Self {
        Self {
            id: feedback.id().to_string(),
            team_id: feedback.team_id().to_string(),
            from_peer_id: feedback.from_member().id().to_string(),
            to_peer_id: feedback.to_member().id().to_string(),
            message: feedback.message().as_str().to_string(),
            created_at: feedback.created_at().as_datetime().to_rfc3339(),
            classification: feedback.classification().map(|c| ClassificationDto {
                category: c.category.clone(),
                confidence_score: c.confidence_score,
            }),
        }
    }
}

/// Denormalized feedback row for a team's wall.
#[derive(Debug, Clone, Serialize)]
pub struct TeamFeedbackResponse {
    pub feedback_id: String,
    pub team_id: String,
    pub team_name: String,
    pub team_kind: String,
    pub from_member_id: String,
    pub from_member_name: String,
    pub to_member_id: String,
    pub to_member_name: String,
    pub message: String,
    pub created_at: String,
}

impl From<&TeamFeedback> for TeamFeedbackResponse {
    fn from(entry: &TeamFeedback) -> Self {
        Self {
            feedback_id: entry.feedback_id.to_string(),
            team_id: entry.team_id.to_string(),
            team_name: entry.team_name.clone(),
            team_kind: entry.team_kind.as_str().to_string(),
            from_member_id: entry.from_member_id.to_string(),
            from_member_name: entry.from_member_name.clone(),
            to_member_id: entry.to_member_id.to_string(),
            to_member_name: entry.to_member_name.clone(),
            message: entry.message.clone(),
            created_at: entry.created_at.as_datetime().to_rfc3339(),
        }
    }
}
