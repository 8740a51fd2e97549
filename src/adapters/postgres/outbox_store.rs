//! PostgreSQL implementation of the durable outbox.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, OutboxMessageId, Timestamp};
use crate::ports::{OutboxMessage, OutboxStore};

#[derive(Clone)]
pub struct PostgresOutboxStore {
    pool: PgPool,
}

impl PostgresOutboxStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OutboxStore for PostgresOutboxStore {
    async fn record(
        &self,
        event_type: &str,
        payload: JsonValue,
    ) -> Result<OutboxMessage, DomainError> {
        let message = OutboxMessage::new(event_type, payload);

        sqlx::query(
            r#"
            INSERT INTO outbox_messages (id, event_type, payload, created_at, processed)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(&message.event_type)
        .bind(&message.payload)
        .bind(message.created_at.as_datetime())
        .bind(message.processed)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to record outbox message: {}", e),
            )
        })?;

        Ok(message)
    }

    async fn fetch_unprocessed(&self) -> Result<Vec<OutboxMessage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, event_type, payload, created_at, processed
            FROM outbox_messages
            WHERE processed = false
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch unprocessed outbox messages: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_message).collect()
    }

    async fn find_by_id(&self, id: OutboxMessageId) -> Result<Option<OutboxMessage>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, event_type, payload, created_at, processed
            FROM outbox_messages WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch outbox message: {}", e),
            )
        })?;

        row.map(row_to_message).transpose()
    }

    async fn mark_processed(&self, id: OutboxMessageId) -> Result<(), DomainError> {
        sqlx::query("UPDATE outbox_messages SET processed = true WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to mark outbox message processed: {}", e),
                )
            })?;

        Ok(())
    }
}

fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read outbox column {}: {}", column, e),
    )
}

fn row_to_message(row: sqlx::postgres::PgRow) -> Result<OutboxMessage, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let event_type: String = row
        .try_get("event_type")
        .map_err(|e| column_error("event_type", e))?;
    let payload: JsonValue = row
        .try_get("payload")
        .map_err(|e| column_error("payload", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let processed: bool = row
        .try_get("processed")
        .map_err(|e| column_error("processed", e))?;

    Ok(OutboxMessage {
        id: OutboxMessageId::from_uuid(id),
        event_type,
        payload,
        created_at: Timestamp::from_datetime(created_at),
        processed,
    })
}
