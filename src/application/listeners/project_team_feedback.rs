//! Reacts to `feedback.given`: appends a row to the denormalized team
//! feedback read model.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::handlers::feedback::FeedbackGivenEvent;
use crate::domain::feedback::TeamFeedback;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, FeedbackRepository, TeamFeedbackRepository, TeamRepository};

pub struct TeamFeedbackProjectionListener {
    feedback_repository: Arc<dyn FeedbackRepository>,
    team_repository: Arc<dyn TeamRepository>,
    team_feedback_repository: Arc<dyn TeamFeedbackRepository>,
}

impl TeamFeedbackProjectionListener {
    pub fn new(
        feedback_repository: Arc<dyn FeedbackRepository>,
        team_repository: Arc<dyn TeamRepository>,
        team_feedback_repository: Arc<dyn TeamFeedbackRepository>,
    ) -> Self {
        Self {
            feedback_repository,
            team_repository,
            team_feedback_repository,
        }
    }
}

#[async_trait]
impl EventHandler for TeamFeedbackProjectionListener {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let payload: FeedbackGivenEvent = event
            .payload_as()
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        let feedback = self
            .feedback_repository
            .find_by_id(payload.feedback_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::FeedbackNotFound, "Feedback not found")
                    .with_detail("feedbackId", payload.feedback_id.to_string())
            })?;

        let team = self
            .team_repository
            .find_by_id(payload.team_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::TeamNotFound, "Team not found")
                    .with_detail("teamId", payload.team_id.to_string())
            })?;

        let row = TeamFeedback::project(&feedback, team.name().as_str(), team.kind());
        self.team_feedback_repository.save(&row).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TeamFeedbackProjectionListener"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::{Feedback, FeedbackMessage};
    use crate::domain::foundation::{
        EventId, FeedbackId, PeerId, SerializableDomainEvent, TeamId,
    };
    use crate::domain::peer::{Email, FirstName, LastName, Peer};
    use crate::domain::team::{Team, TeamKind, TeamName};
    use std::sync::Mutex;

    struct MockFeedbackRepository {
        feedbacks: Vec<Feedback>,
    }

    #[async_trait]
    impl FeedbackRepository for MockFeedbackRepository {
        async fn save(&self, feedback: &Feedback) -> Result<Feedback, DomainError> {
            Ok(feedback.clone())
        }

        async fn find_by_id(&self, id: FeedbackId) -> Result<Option<Feedback>, DomainError> {
            Ok(self.feedbacks.iter().find(|f| f.id() == id).cloned())
        }
    }

    struct MockTeamRepository {
        teams: Vec<Team>,
    }

    #[async_trait]
    impl TeamRepository for MockTeamRepository {
        async fn save(&self, team: &Team) -> Result<Team, DomainError> {
            Ok(team.clone())
        }

        async fn find_by_id(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
            Ok(self.teams.iter().find(|t| t.id() == id).cloned())
        }

        async fn find_by_name(&self, name: &TeamName) -> Result<Option<Team>, DomainError> {
            Ok(self.teams.iter().find(|t| t.name() == name).cloned())
        }

        async fn find_by_owner(&self, owner_id: PeerId) -> Result<Option<Team>, DomainError> {
            Ok(self.teams.iter().find(|t| t.owner().id() == owner_id).cloned())
        }
    }

    struct MockTeamFeedbackRepository {
        rows: Mutex<Vec<TeamFeedback>>,
    }

    #[async_trait]
    impl TeamFeedbackRepository for MockTeamFeedbackRepository {
        async fn save(&self, row: &TeamFeedback) -> Result<(), DomainError> {
            self.rows.lock().unwrap().push(row.clone());
            Ok(())
        }

        async fn list_for_team(
            &self,
            team_id: TeamId,
            limit: u32,
        ) -> Result<Vec<TeamFeedback>, DomainError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.team_id == team_id)
                .take(limit as usize)
                .cloned()
                .collect())
        }
    }

    #[tokio::test]
    async fn projects_feedback_into_read_model() {
        let owner = Peer::new(
            FirstName::new("Amelia").unwrap(),
            LastName::new("Stone").unwrap(),
            Email::new("amelia@gmail.com").unwrap(),
            "auth-1",
            None,
        );
        let receiver = Peer::new(
            FirstName::new("Ben").unwrap(),
            LastName::new("Field").unwrap(),
            Email::new("ben@gmail.com").unwrap(),
            "auth-2",
            None,
        );
        let team = Team::new(
            TeamName::new("Pioneers").unwrap(),
            TeamKind::Family,
            owner.clone(),
        );
        let feedback = Feedback::new(
            team.id(),
            owner.clone(),
            receiver.clone(),
            FeedbackMessage::new("Great job today").unwrap(),
        );

        let rows = Arc::new(MockTeamFeedbackRepository {
            rows: Mutex::new(Vec::new()),
        });
        let listener = TeamFeedbackProjectionListener::new(
            Arc::new(MockFeedbackRepository {
                feedbacks: vec![feedback.clone()],
            }),
            Arc::new(MockTeamRepository {
                teams: vec![team.clone()],
            }),
            rows.clone(),
        );

        let event = FeedbackGivenEvent {
            event_id: EventId::new(),
            feedback_id: feedback.id(),
            team_id: team.id(),
            from_member_id: owner.id(),
            to_member_id: receiver.id(),
            message: feedback.message().as_str().to_string(),
            created_at: feedback.created_at(),
        };

        listener.handle(event.to_envelope()).await.unwrap();

        let stored = rows.list_for_team(team.id(), 10).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].from_member_name, "Amelia Stone");
        assert_eq!(stored[0].team_name, "Pioneers");
    }
}
