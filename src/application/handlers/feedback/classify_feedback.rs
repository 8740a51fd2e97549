//! ClassifyFeedbackHandler - attaches a growth category to stored feedback.

use std::sync::Arc;

use tracing::info;

use crate::domain::feedback::{ClassificationResult, Feedback};
use crate::domain::foundation::{DomainError, ErrorCode, FeedbackId, TeamId};
use crate::ports::{FeedbackClassifier, FeedbackRepository, TaxonomyRepository, TeamRepository};

/// Command to classify one feedback message.
#[derive(Debug, Clone)]
pub struct ClassifyFeedbackCommand {
    pub feedback_id: FeedbackId,
    pub team_id: TeamId,
    pub message: String,
}

/// Outcome of a classification attempt.
#[derive(Debug, Clone)]
pub enum ClassifyFeedbackOutcome {
    Classified(Feedback),
    /// No taxonomy (or an empty one) applies to the team's kind; nothing to
    /// classify against, and that is not an error.
    Skipped,
}

/// Error type for classification.
#[derive(Debug, Clone)]
pub enum ClassifyFeedbackError {
    FeedbackNotFound(FeedbackId),
    TeamNotFound(TeamId),
    Domain(DomainError),
}

impl std::fmt::Display for ClassifyFeedbackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyFeedbackError::FeedbackNotFound(id) => {
                write!(f, "Feedback not found: {}", id)
            }
            ClassifyFeedbackError::TeamNotFound(id) => write!(f, "Team not found: {}", id),
            ClassifyFeedbackError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClassifyFeedbackError {}

impl From<DomainError> for ClassifyFeedbackError {
    fn from(err: DomainError) -> Self {
        ClassifyFeedbackError::Domain(err)
    }
}

impl From<ClassifyFeedbackError> for DomainError {
    fn from(err: ClassifyFeedbackError) -> Self {
        match err {
            ClassifyFeedbackError::FeedbackNotFound(id) => {
                DomainError::new(ErrorCode::FeedbackNotFound, "Feedback not found")
                    .with_detail("feedbackId", id.to_string())
            }
            ClassifyFeedbackError::TeamNotFound(id) => {
                DomainError::new(ErrorCode::TeamNotFound, "Team not found")
                    .with_detail("teamId", id.to_string())
            }
            ClassifyFeedbackError::Domain(err) => err,
        }
    }
}

/// Handler for classifying feedback.
pub struct ClassifyFeedbackHandler {
    team_repository: Arc<dyn TeamRepository>,
    taxonomy_repository: Arc<dyn TaxonomyRepository>,
    feedback_repository: Arc<dyn FeedbackRepository>,
    classifier: Arc<dyn FeedbackClassifier>,
}

impl ClassifyFeedbackHandler {
    pub fn new(
        team_repository: Arc<dyn TeamRepository>,
        taxonomy_repository: Arc<dyn TaxonomyRepository>,
        feedback_repository: Arc<dyn FeedbackRepository>,
        classifier: Arc<dyn FeedbackClassifier>,
    ) -> Self {
        Self {
            team_repository,
            taxonomy_repository,
            feedback_repository,
            classifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: ClassifyFeedbackCommand,
    ) -> Result<ClassifyFeedbackOutcome, ClassifyFeedbackError> {
        let team = self
            .team_repository
            .find_by_id(cmd.team_id)
            .await?
            .ok_or(ClassifyFeedbackError::TeamNotFound(cmd.team_id))?;

        let labels = match self
            .taxonomy_repository
            .find_by_team_kind(team.kind())
            .await?
        {
            Some(taxonomy) if !taxonomy.categories.is_empty() => taxonomy.labels(),
            _ => {
                info!(
                    team_kind = %team.kind(),
                    feedback_id = %cmd.feedback_id,
                    "no taxonomy for team kind, skipping classification"
                );
                return Ok(ClassifyFeedbackOutcome::Skipped);
            }
        };

        let classification = self.classifier.classify(&cmd.message, &labels).await?;

        let mut feedback = self
            .feedback_repository
            .find_by_id(cmd.feedback_id)
            .await?
            .ok_or(ClassifyFeedbackError::FeedbackNotFound(cmd.feedback_id))?;

        feedback.classify(ClassificationResult {
            category: classification.category,
            confidence_score: classification.confidence_score,
        })?;
        let saved = self.feedback_repository.save(&feedback).await?;

        Ok(ClassifyFeedbackOutcome::Classified(saved))
    }
}
