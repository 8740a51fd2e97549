//! PostgreSQL implementation of TaxonomyRepository.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, TaxonomyId, Timestamp};
use crate::domain::taxonomy::{CategoryTaxonomy, GrowthCategory};
use crate::domain::team::TeamKind;
use crate::ports::TaxonomyRepository;

#[derive(Clone)]
pub struct PostgresTaxonomyRepository {
    pool: PgPool,
}

impl PostgresTaxonomyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaxonomyRepository for PostgresTaxonomyRepository {
    async fn find_by_team_kind(
        &self,
        kind: TeamKind,
    ) -> Result<Option<CategoryTaxonomy>, DomainError> {
        let row = sqlx::query(
            "SELECT id, team_kind, categories, created_at FROM taxonomies WHERE team_kind = $1",
        )
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch taxonomy: {}", e),
            )
        })?;

        row.map(row_to_taxonomy).transpose()
    }

    async fn list_all(&self) -> Result<Vec<CategoryTaxonomy>, DomainError> {
        let rows =
            sqlx::query("SELECT id, team_kind, categories, created_at FROM taxonomies")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to list taxonomies: {}", e),
                    )
                })?;

        rows.into_iter().map(row_to_taxonomy).collect()
    }
}

fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read taxonomy column {}: {}", column, e),
    )
}

fn row_to_taxonomy(row: sqlx::postgres::PgRow) -> Result<CategoryTaxonomy, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let team_kind: String = row
        .try_get("team_kind")
        .map_err(|e| column_error("team_kind", e))?;
    let categories: JsonValue = row
        .try_get("categories")
        .map_err(|e| column_error("categories", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;

    let categories: Vec<GrowthCategory> =
        serde_json::from_value(categories).map_err(|e| column_error("categories", e))?;

    Ok(CategoryTaxonomy {
        id: TaxonomyId::from_uuid(id),
        team_kind: TeamKind::parse(&team_kind).map_err(|e| column_error("team_kind", e))?,
        categories,
        created_at: Timestamp::from_datetime(created_at),
    })
}
