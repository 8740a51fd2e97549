//! PostgreSQL implementation of FeedbackRepository.
//!
//! Feedback rows reference the giving and receiving peers by id; the full
//! peer state is loaded on read so the aggregate round-trips.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::feedback::{ClassificationResult, Feedback, FeedbackMessage};
use crate::domain::foundation::{DomainError, ErrorCode, FeedbackId, PeerId, TeamId, Timestamp};
use crate::domain::peer::Peer;
use crate::ports::FeedbackRepository;

use super::peer_repository::row_to_peer;

#[derive(Clone)]
pub struct PostgresFeedbackRepository {
    pool: PgPool,
}

impl PostgresFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_peer(&self, id: PeerId, role: &str) -> Result<Peer, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, subject, profile_url, own_team, invited_teams
            FROM peers WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch feedback {}: {}", role, e),
            )
        })?
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Feedback {} row is missing", role),
            )
            .with_detail("peerId", id.to_string())
        })?;

        row_to_peer(row)
    }

    async fn load(&self, row: sqlx::postgres::PgRow) -> Result<Feedback, DomainError> {
        let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
        let team_id: uuid::Uuid = row
            .try_get("team_id")
            .map_err(|e| column_error("team_id", e))?;
        let from_member_id: uuid::Uuid = row
            .try_get("from_member_id")
            .map_err(|e| column_error("from_member_id", e))?;
        let to_member_id: uuid::Uuid = row
            .try_get("to_member_id")
            .map_err(|e| column_error("to_member_id", e))?;
        let message: String = row
            .try_get("message")
            .map_err(|e| column_error("message", e))?;
        let created_at: chrono::DateTime<chrono::Utc> = row
            .try_get("created_at")
            .map_err(|e| column_error("created_at", e))?;
        let category: Option<String> = row
            .try_get("classification_category")
            .map_err(|e| column_error("classification_category", e))?;
        let confidence: Option<f64> = row
            .try_get("classification_confidence")
            .map_err(|e| column_error("classification_confidence", e))?;

        let classification = match (category, confidence) {
            (Some(category), Some(confidence_score)) => Some(ClassificationResult {
                category,
                confidence_score,
            }),
            _ => None,
        };

        let from_member = self.load_peer(PeerId::from_uuid(from_member_id), "giver").await?;
        let to_member = self.load_peer(PeerId::from_uuid(to_member_id), "receiver").await?;

        Ok(Feedback::from_parts(
            FeedbackId::from_uuid(id),
            TeamId::from_uuid(team_id),
            from_member,
            to_member,
            FeedbackMessage::new(message).map_err(|e| column_error("message", e))?,
            Timestamp::from_datetime(created_at),
            classification,
        ))
    }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    async fn save(&self, feedback: &Feedback) -> Result<Feedback, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO feedback (
                id, team_id, from_member_id, to_member_id, message, created_at,
                classification_category, classification_confidence
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                classification_category = EXCLUDED.classification_category,
                classification_confidence = EXCLUDED.classification_confidence
            "#,
        )
        .bind(feedback.id().as_uuid())
        .bind(feedback.team_id().as_uuid())
        .bind(feedback.from_member().id().as_uuid())
        .bind(feedback.to_member().id().as_uuid())
        .bind(feedback.message().as_str())
        .bind(feedback.created_at().as_datetime())
        .bind(feedback.classification().map(|c| c.category.as_str()))
        .bind(feedback.classification().map(|c| c.confidence_score))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save feedback: {}", e),
            )
        })?;

        Ok(feedback.clone())
    }

    async fn find_by_id(&self, id: FeedbackId) -> Result<Option<Feedback>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, team_id, from_member_id, to_member_id, message, created_at,
                   classification_category, classification_confidence
            FROM feedback WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch feedback: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(self.load(row).await?)),
            None => Ok(None),
        }
    }
}

fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read feedback column {}: {}", column, e),
    )
}
