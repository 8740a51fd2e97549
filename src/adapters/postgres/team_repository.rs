//! PostgreSQL implementation of TeamRepository.
//!
//! Team rows hold the scalar columns; members live in a join table and the
//! owner is a reference into `peers`. Pending members are not stored on the
//! team: they are the owner's invitations that have not been accepted yet,
//! so an accepted invitation drops out of the pending list on its own.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, PeerId, TeamId};
use crate::domain::invitation::Invitation;
use crate::domain::peer::Peer;
use crate::domain::team::{Team, TeamKind, TeamName};
use crate::ports::TeamRepository;

use super::invitation_repository::row_to_invitation;
use super::peer_repository::row_to_peer;

#[derive(Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load(&self, row: sqlx::postgres::PgRow) -> Result<Team, DomainError> {
        let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
        let name: String = row.try_get("name").map_err(|e| column_error("name", e))?;
        let kind: String = row.try_get("kind").map_err(|e| column_error("kind", e))?;
        let owner_id: uuid::Uuid = row
            .try_get("owner_id")
            .map_err(|e| column_error("owner_id", e))?;

        let team_id = TeamId::from_uuid(id);
        let owner_id = PeerId::from_uuid(owner_id);

        let owner = self.load_owner(owner_id).await?;
        let members = self.load_members(team_id).await?;
        let pending = self.load_pending(owner_id).await?;

        Ok(Team::from_parts(
            team_id,
            TeamName::new(name).map_err(|e| column_error("name", e))?,
            TeamKind::parse(&kind).map_err(|e| column_error("kind", e))?,
            owner,
            members,
            pending,
        ))
    }

    async fn load_owner(&self, owner_id: PeerId) -> Result<Peer, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, subject, profile_url, own_team, invited_teams
            FROM peers WHERE id = $1
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch team owner: {}", e),
            )
        })?
        .ok_or_else(|| {
            DomainError::new(ErrorCode::DatabaseError, "Team owner row is missing")
                .with_detail("ownerId", owner_id.to_string())
        })?;

        row_to_peer(row)
    }

    async fn load_members(&self, team_id: TeamId) -> Result<Vec<Peer>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.first_name, p.last_name, p.email, p.subject,
                   p.profile_url, p.own_team, p.invited_teams
            FROM peers p
            JOIN team_members tm ON tm.peer_id = p.id
            WHERE tm.team_id = $1
            ORDER BY tm.joined_at
            "#,
        )
        .bind(team_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch team members: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_peer).collect()
    }

    async fn load_pending(&self, owner_id: PeerId) -> Result<Vec<Invitation>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, slug, team_name, inviter_name, team_owner_id,
                   created_at, expires_at, accepted_at
            FROM invitations
            WHERE team_owner_id = $1 AND accepted_at IS NULL
            ORDER BY created_at
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch pending invitations: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_invitation).collect()
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    /// Upserts by name: creating a team under an existing name updates its
    /// kind and owner in place, keeping the stored id.
    async fn save(&self, team: &Team) -> Result<Team, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO teams (id, name, kind, owner_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO UPDATE SET
                kind = EXCLUDED.kind,
                owner_id = EXCLUDED.owner_id
            RETURNING id, name, kind, owner_id
            "#,
        )
        .bind(team.id().as_uuid())
        .bind(team.name().as_str())
        .bind(team.kind().as_str())
        .bind(team.owner().id().as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save team: {}", e),
            )
        })?;

        let stored_id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
        let stored_id = TeamId::from_uuid(stored_id);

        // Replace the membership rows with the aggregate's current list.
        sqlx::query("DELETE FROM team_members WHERE team_id = $1")
            .bind(stored_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to clear team members: {}", e),
                )
            })?;

        for member in team.members() {
            sqlx::query(
                r#"
                INSERT INTO team_members (team_id, peer_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(stored_id.as_uuid())
            .bind(member.id().as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to save team member: {}", e),
                )
            })?;
        }

        self.load(row).await
    }

    async fn find_by_id(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, name, kind, owner_id FROM teams WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch team: {}", e),
                )
            })?;

        match row {
            Some(row) => Ok(Some(self.load(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &TeamName) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, name, kind, owner_id FROM teams WHERE name = $1")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch team by name: {}", e),
                )
            })?;

        match row {
            Some(row) => Ok(Some(self.load(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_owner(&self, owner_id: PeerId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, name, kind, owner_id FROM teams WHERE owner_id = $1")
            .bind(owner_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch team by owner: {}", e),
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
        format!("Failed to read team column {}: {}", column, e),
    )
}
