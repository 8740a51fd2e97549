//! PostgreSQL implementation of InvitationRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, InvitationId, PeerId, Timestamp};
use crate::domain::invitation::{Invitation, InviteSlug};
use crate::domain::peer::{Email, FirstName};
use crate::domain::team::TeamName;
use crate::ports::InvitationRepository;

const INVITATION_COLUMNS: &str =
    "id, email, slug, team_name, inviter_name, team_owner_id, created_at, expires_at, accepted_at";

#[derive(Clone)]
pub struct PostgresInvitationRepository {
    pool: PgPool,
}

impl PostgresInvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for PostgresInvitationRepository {
    async fn save(&self, invitation: &Invitation) -> Result<Invitation, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO invitations (
                id, email, slug, team_name, inviter_name, team_owner_id,
                created_at, expires_at, accepted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                accepted_at = EXCLUDED.accepted_at
            RETURNING {INVITATION_COLUMNS}
            "#
        ))
        .bind(invitation.id().as_uuid())
        .bind(invitation.email().as_str())
        .bind(invitation.slug().as_str())
        .bind(invitation.team_name().as_str())
        .bind(invitation.inviter_name().as_str())
        .bind(invitation.team_owner_id().as_uuid())
        .bind(invitation.created_at().as_datetime())
        .bind(invitation.expires_at().as_datetime())
        .bind(invitation.accepted_at().map(|t| t.as_datetime()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save invitation: {}", e),
            )
        })?;

        row_to_invitation(row)
    }

    async fn find_by_id(&self, id: InvitationId) -> Result<Option<Invitation>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch invitation: {}", e),
            )
        })?;

        row.map(row_to_invitation).transpose()
    }

    async fn find_by_slug(&self, slug: &InviteSlug) -> Result<Option<Invitation>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch invitation by slug: {}", e),
            )
        })?;

        row.map(row_to_invitation).transpose()
    }
}

fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read invitation column {}: {}", column, e),
    )
}

pub(crate) fn row_to_invitation(row: sqlx::postgres::PgRow) -> Result<Invitation, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let email: String = row.try_get("email").map_err(|e| column_error("email", e))?;
    let slug: String = row.try_get("slug").map_err(|e| column_error("slug", e))?;
    let team_name: String = row
        .try_get("team_name")
        .map_err(|e| column_error("team_name", e))?;
    let inviter_name: String = row
        .try_get("inviter_name")
        .map_err(|e| column_error("inviter_name", e))?;
    let team_owner_id: uuid::Uuid = row
        .try_get("team_owner_id")
        .map_err(|e| column_error("team_owner_id", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let expires_at: chrono::DateTime<chrono::Utc> = row
        .try_get("expires_at")
        .map_err(|e| column_error("expires_at", e))?;
    let accepted_at: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("accepted_at")
        .map_err(|e| column_error("accepted_at", e))?;

    Ok(Invitation::from_parts(
        InvitationId::from_uuid(id),
        Email::new(email).map_err(|e| column_error("email", e))?,
        InviteSlug::new(slug).map_err(|e| column_error("slug", e))?,
        TeamName::new(team_name).map_err(|e| column_error("team_name", e))?,
        FirstName::new(inviter_name).map_err(|e| column_error("inviter_name", e))?,
        PeerId::from_uuid(team_owner_id),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(expires_at),
        accepted_at.map(Timestamp::from_datetime),
    ))
}
