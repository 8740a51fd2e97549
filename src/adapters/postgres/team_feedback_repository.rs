//! PostgreSQL implementation of TeamFeedbackRepository.
//!
//! Stores the denormalized team feedback read model exactly as projected.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::feedback::TeamFeedback;
use crate::domain::foundation::{DomainError, ErrorCode, FeedbackId, PeerId, TeamId, Timestamp};
use crate::domain::team::TeamKind;
use crate::ports::TeamFeedbackRepository;

#[derive(Clone)]
pub struct PostgresTeamFeedbackRepository {
    pool: PgPool,
}

impl PostgresTeamFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamFeedbackRepository for PostgresTeamFeedbackRepository {
    async fn save(&self, row: &TeamFeedback) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO team_feedback (
                feedback_id, team_id, team_name, team_kind,
                from_member_id, from_member_name, to_member_id, to_member_name,
                message, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (feedback_id) DO NOTHING
            "#,
        )
        .bind(row.feedback_id.as_uuid())
        .bind(row.team_id.as_uuid())
        .bind(&row.team_name)
        .bind(row.team_kind.as_str())
        .bind(row.from_member_id.as_uuid())
        .bind(&row.from_member_name)
        .bind(row.to_member_id.as_uuid())
        .bind(&row.to_member_name)
        .bind(&row.message)
        .bind(row.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save team feedback row: {}", e),
            )
        })?;

        Ok(())
    }

    async fn list_for_team(
        &self,
        team_id: TeamId,
        limit: u32,
    ) -> Result<Vec<TeamFeedback>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT feedback_id, team_id, team_name, team_kind,
                   from_member_id, from_member_name, to_member_id, to_member_name,
                   message, created_at
            FROM team_feedback
            WHERE team_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(team_id.as_uuid())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list team feedback: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_team_feedback).collect()
    }
}

fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read team feedback column {}: {}", column, e),
    )
}

fn row_to_team_feedback(row: sqlx::postgres::PgRow) -> Result<TeamFeedback, DomainError> {
    let feedback_id: uuid::Uuid = row
        .try_get("feedback_id")
        .map_err(|e| column_error("feedback_id", e))?;
    let team_id: uuid::Uuid = row
        .try_get("team_id")
        .map_err(|e| column_error("team_id", e))?;
    let team_name: String = row
        .try_get("team_name")
        .map_err(|e| column_error("team_name", e))?;
    let team_kind: String = row
        .try_get("team_kind")
        .map_err(|e| column_error("team_kind", e))?;
    let from_member_id: uuid::Uuid = row
        .try_get("from_member_id")
        .map_err(|e| column_error("from_member_id", e))?;
    let from_member_name: String = row
        .try_get("from_member_name")
        .map_err(|e| column_error("from_member_name", e))?;
    let to_member_id: uuid::Uuid = row
        .try_get("to_member_id")
        .map_err(|e| column_error("to_member_id", e))?;
    let to_member_name: String = row
        .try_get("to_member_name")
        .map_err(|e| column_error("to_member_name", e))?;
    let message: String = row
        .try_get("message")
        .map_err(|e| column_error("message", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;

    Ok(TeamFeedback {
        feedback_id: FeedbackId::from_uuid(feedback_id),
        team_id: TeamId::from_uuid(team_id),
        team_name,
        team_kind: TeamKind::parse(&team_kind).map_err(|e| column_error("team_kind", e))?,
        from_member_id: PeerId::from_uuid(from_member_id),
        from_member_name,
        to_member_id: PeerId::from_uuid(to_member_id),
        to_member_name,
        message,
        created_at: Timestamp::from_datetime(created_at),
    })
}
