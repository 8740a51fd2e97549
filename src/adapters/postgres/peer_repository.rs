//! PostgreSQL implementation of PeerRepository.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, PeerId};
use crate::domain::peer::{Email, FirstName, LastName, Peer, ProfileUrl, TeamLink};
use crate::ports::PeerRepository;

const PEER_COLUMNS: &str =
    "id, first_name, last_name, email, subject, profile_url, own_team, invited_teams";

#[derive(Clone)]
pub struct PostgresPeerRepository {
    pool: PgPool,
}

impl PostgresPeerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PeerRepository for PostgresPeerRepository {
    /// Upserts by auth subject: a repeated save for the same subject updates
    /// the stored profile and keeps the original id.
    async fn save(&self, peer: &Peer) -> Result<Peer, DomainError> {
        let own_team = peer
            .own_team()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to serialize own_team: {}", e),
                )
            })?;
        let invited_teams = serde_json::to_value(peer.invited_teams()).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to serialize invited_teams: {}", e),
            )
        })?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO peers (
                id, first_name, last_name, email, subject, profile_url, own_team, invited_teams
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (subject) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                profile_url = EXCLUDED.profile_url,
                own_team = EXCLUDED.own_team,
                invited_teams = EXCLUDED.invited_teams
            RETURNING {PEER_COLUMNS}
            "#
        ))
        .bind(peer.id().as_uuid())
        .bind(peer.first_name().as_str())
        .bind(peer.last_name().as_str())
        .bind(peer.email().as_str())
        .bind(peer.subject())
        .bind(peer.profile_url().map(|u| u.as_str()))
        .bind(own_team)
        .bind(invited_teams)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save peer: {}", e),
            )
        })?;

        row_to_peer(row)
    }

    async fn find_by_id(&self, id: PeerId) -> Result<Option<Peer>, DomainError> {
        let row = sqlx::query(&format!("SELECT {PEER_COLUMNS} FROM peers WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch peer: {}", e),
                )
            })?;

        row.map(row_to_peer).transpose()
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<Peer>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {PEER_COLUMNS} FROM peers WHERE subject = $1"
        ))
        .bind(subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch peer by subject: {}", e),
            )
        })?;

        row.map(row_to_peer).transpose()
    }
}

fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read peer column {}: {}", column, e),
    )
}

pub(crate) fn row_to_peer(row: sqlx::postgres::PgRow) -> Result<Peer, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let first_name: String = row
        .try_get("first_name")
        .map_err(|e| column_error("first_name", e))?;
    let last_name: String = row
        .try_get("last_name")
        .map_err(|e| column_error("last_name", e))?;
    let email: String = row.try_get("email").map_err(|e| column_error("email", e))?;
    let subject: String = row
        .try_get("subject")
        .map_err(|e| column_error("subject", e))?;
    let profile_url: Option<String> = row
        .try_get("profile_url")
        .map_err(|e| column_error("profile_url", e))?;
    let own_team: Option<JsonValue> = row
        .try_get("own_team")
        .map_err(|e| column_error("own_team", e))?;
    let invited_teams: JsonValue = row
        .try_get("invited_teams")
        .map_err(|e| column_error("invited_teams", e))?;

    let own_team: Option<TeamLink> = own_team
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| column_error("own_team", e))?;
    let invited_teams: Vec<TeamLink> =
        serde_json::from_value(invited_teams).map_err(|e| column_error("invited_teams", e))?;

    Ok(Peer::from_parts(
        PeerId::from_uuid(id),
        FirstName::new(first_name).map_err(|e| column_error("first_name", e))?,
        LastName::new(last_name).map_err(|e| column_error("last_name", e))?,
        Email::new(email).map_err(|e| column_error("email", e))?,
        subject,
        profile_url
            .map(ProfileUrl::new)
            .transpose()
            .map_err(|e| column_error("profile_url", e))?,
        own_team,
        invited_teams,
    ))
}
