//! PostgreSQL implementation of DelayRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, db_error, enum_column, stale_or_missing};
use crate::domain::delay::{Delay, DelayKind};
use crate::domain::foundation::{DelayId, DomainError, ErrorCode, InterventionId, Timestamp, UserId};
use crate::ports::DelayRepository;

const SELECT_DELAY: &str = r#"
    SELECT id, intervention_id, kind, started_at, ended_at, duration_secs,
           reason, impact, corrective_actions, responsible_id, resolved,
           created_at, version
    FROM delays
"#;

#[derive(Clone)]
pub struct PostgresDelayRepository {
    pool: PgPool,
}

impl PostgresDelayRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DelayRepository for PostgresDelayRepository {
    async fn save(&self, delay: &Delay) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO delays (
                id, intervention_id, kind, started_at, ended_at, duration_secs,
                reason, impact, corrective_actions, responsible_id, resolved,
                created_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(delay.id().as_uuid())
        .bind(delay.intervention_id().as_uuid())
        .bind(delay.kind().as_str())
        .bind(delay.started_at().as_datetime())
        .bind(delay.ended_at().map(|t| *t.as_datetime()))
        .bind(delay.duration_secs())
        .bind(delay.reason())
        .bind(delay.impact())
        .bind(delay.corrective_actions())
        .bind(delay.responsible_id().map(|id| *id.as_uuid()))
        .bind(delay.is_resolved())
        .bind(delay.created_at().as_datetime())
        .bind(delay.version())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert delay", e))?;

        Ok(())
    }

    async fn update(&self, delay: &Delay) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE delays SET
                kind = $3,
                ended_at = $4,
                duration_secs = $5,
                reason = $6,
                impact = $7,
                corrective_actions = $8,
                resolved = $9,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(delay.id().as_uuid())
        .bind(delay.version())
        .bind(delay.kind().as_str())
        .bind(delay.ended_at().map(|t| *t.as_datetime()))
        .bind(delay.duration_secs())
        .bind(delay.reason())
        .bind(delay.impact())
        .bind(delay.corrective_actions())
        .bind(delay.is_resolved())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update delay", e))?;

        if result.rows_affected() == 0 {
            return Err(stale_or_missing(
                &self.pool,
                "delays",
                *delay.id().as_uuid(),
                delay.version(),
                ErrorCode::DelayNotFound,
            )
            .await);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &DelayId) -> Result<Option<Delay>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_DELAY))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch delay", e))?;

        row.as_ref().map(row_to_delay).transpose()
    }

    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Vec<Delay>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE intervention_id = $1 ORDER BY created_at DESC, id DESC",
            SELECT_DELAY
        ))
        .bind(intervention_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch delays by intervention", e))?;

        rows.iter().map(row_to_delay).collect()
    }

    async fn find_by_responsible(&self, user_id: &UserId) -> Result<Vec<Delay>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE responsible_id = $1 ORDER BY created_at DESC, id DESC",
            SELECT_DELAY
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch delays by responsible", e))?;

        rows.iter().map(row_to_delay).collect()
    }

    async fn find_all(&self) -> Result<Vec<Delay>, DomainError> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at DESC, id DESC", SELECT_DELAY))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch delays", e))?;

        rows.iter().map(row_to_delay).collect()
    }
}

fn row_to_delay(row: &PgRow) -> Result<Delay, DomainError> {
    let id: Uuid = column(row, "id")?;
    let intervention_id: Uuid = column(row, "intervention_id")?;
    let started_at: DateTime<Utc> = column(row, "started_at")?;
    let ended_at: Option<DateTime<Utc>> = column(row, "ended_at")?;
    let responsible_id: Option<Uuid> = column(row, "responsible_id")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;

    Ok(Delay::reconstitute(
        DelayId::from_uuid(id),
        InterventionId::from_uuid(intervention_id),
        enum_column::<DelayKind>(row, "kind")?,
        Timestamp::from_datetime(started_at),
        ended_at.map(Timestamp::from_datetime),
        column(row, "duration_secs")?,
        column(row, "reason")?,
        column(row, "impact")?,
        column(row, "corrective_actions")?,
        responsible_id.map(UserId::from_uuid),
        column(row, "resolved")?,
        Timestamp::from_datetime(created_at),
        column(row, "version")?,
    ))
}
