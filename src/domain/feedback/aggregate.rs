//! Feedback aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, FeedbackId, TeamId, Timestamp};
use crate::domain::peer::Peer;

use super::FeedbackMessage;

/// Outcome of running a feedback message through the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: String,
    pub confidence_score: f64,
}

/// One feedback message from one peer to another within a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    id: FeedbackId,
    team_id: TeamId,
    from_member: Peer,
    to_member: Peer,
    message: FeedbackMessage,
    created_at: Timestamp,
    classification: Option<ClassificationResult>,
}

impl Feedback {
    pub fn new(team_id: TeamId, from_member: Peer, to_member: Peer, message: FeedbackMessage) -> Self {
        Self {
            id: FeedbackId::new(),
            team_id,
            from_member,
            to_member,
            message,
            created_at: Timestamp::now(),
            classification: None,
        }
    }

    /// Rebuilds feedback from stored state.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: FeedbackId,
        team_id: TeamId,
        from_member: Peer,
        to_member: Peer,
        message: FeedbackMessage,
        created_at: Timestamp,
        classification: Option<ClassificationResult>,
    ) -> Self {
        Self {
            id,
            team_id,
            from_member,
            to_member,
            message,
            created_at,
            classification,
        }
    }

    pub fn id(&self) -> FeedbackId {
        self.id
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn from_member(&self) -> &Peer {
        &self.from_member
    }

    pub fn to_member(&self) -> &Peer {
        &self.to_member
    }

    pub fn message(&self) -> &FeedbackMessage {
        &self.message
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn classification(&self) -> Option<&ClassificationResult> {
        self.classification.as_ref()
    }

    /// Attaches the classification result. Classification happens once.
    pub fn classify(&mut self, result: ClassificationResult) -> Result<(), DomainError> {
        if self.classification.is_some() {
            return Err(DomainError::business_rule(
                "Feedback has already been classified",
            )
            .with_detail("feedbackId", self.id.to_string()));
        }
        self.classification = Some(result);
        Ok(())
    }
}
