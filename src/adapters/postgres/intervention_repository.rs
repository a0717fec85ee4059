//! PostgreSQL implementation of InterventionRepository.
//!
//! The field report and the delay flags are flattened into columns of the
//! `interventions` row.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, db_error, enum_column, stale_or_missing};
use crate::domain::foundation::{
    DomainError, ErrorCode, InterventionId, InterventionOutcome, InterventionStatus, MissionId,
    Timestamp, UserId,
};
use crate::domain::intervention::{DelayFlags, FieldReport, Intervention, Priority};
use crate::ports::InterventionRepository;

const SELECT_INTERVENTION: &str = r#"
    SELECT id, mission_id, title, intervenant_id, created_by, scheduled_date,
           due_date, priority, resources, status, started_at, finished_at,
           outcome, arrival_time, departure_time, difficulties,
           late, late_since, delay_duration_secs, delay_reason, delay_resolved,
           created_at, version
    FROM interventions
"#;

#[derive(Clone)]
pub struct PostgresInterventionRepository {
    pool: PgPool,
}

impl PostgresInterventionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(
        &self,
        clause: &str,
        bind: Option<Uuid>,
        context: &str,
    ) -> Result<Vec<Intervention>, DomainError> {
        let sql = format!("{} {}", SELECT_INTERVENTION, clause);
        let mut query = sqlx::query(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(context, e))?;

        rows.iter().map(row_to_intervention).collect()
    }
}

#[async_trait]
impl InterventionRepository for PostgresInterventionRepository {
    async fn save(&self, intervention: &Intervention) -> Result<(), DomainError> {
        let report = intervention.field_report();
        let delay = intervention.delay();
        sqlx::query(
            r#"
            INSERT INTO interventions (
                id, mission_id, title, intervenant_id, created_by, scheduled_date,
                due_date, priority, resources, status, started_at, finished_at,
                outcome, arrival_time, departure_time, difficulties,
                late, late_since, delay_duration_secs, delay_reason, delay_resolved,
                created_at, version
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23
            )
            "#,
        )
        .bind(intervention.id().as_uuid())
        .bind(intervention.mission_id().as_uuid())
        .bind(intervention.title())
        .bind(intervention.intervenant_id().map(|id| *id.as_uuid()))
        .bind(intervention.created_by().map(|id| *id.as_uuid()))
        .bind(intervention.scheduled_date())
        .bind(intervention.due_date())
        .bind(intervention.priority().as_str())
        .bind(intervention.resources())
        .bind(intervention.status().as_str())
        .bind(intervention.started_at().map(|t| *t.as_datetime()))
        .bind(intervention.finished_at().map(|t| *t.as_datetime()))
        .bind(report.outcome.as_str())
        .bind(report.arrival_time)
        .bind(report.departure_time)
        .bind(&report.difficulties)
        .bind(delay.late)
        .bind(delay.late_since.map(|t| *t.as_datetime()))
        .bind(delay.duration_secs)
        .bind(&delay.reason)
        .bind(delay.resolved)
        .bind(intervention.created_at().as_datetime())
        .bind(intervention.version())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert intervention", e))?;

        Ok(())
    }

    async fn update(&self, intervention: &Intervention) -> Result<(), DomainError> {
        let report = intervention.field_report();
        let delay = intervention.delay();
        let result = sqlx::query(
            r#"
            UPDATE interventions SET
                title = $3,
                intervenant_id = $4,
                scheduled_date = $5,
                due_date = $6,
                priority = $7,
                resources = $8,
                status = $9,
                started_at = $10,
                finished_at = $11,
                outcome = $12,
                arrival_time = $13,
                departure_time = $14,
                difficulties = $15,
                late = $16,
                late_since = $17,
                delay_duration_secs = $18,
                delay_reason = $19,
                delay_resolved = $20,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(intervention.id().as_uuid())
        .bind(intervention.version())
        .bind(intervention.title())
        .bind(intervention.intervenant_id().map(|id| *id.as_uuid()))
        .bind(intervention.scheduled_date())
        .bind(intervention.due_date())
        .bind(intervention.priority().as_str())
        .bind(intervention.resources())
        .bind(intervention.status().as_str())
        .bind(intervention.started_at().map(|t| *t.as_datetime()))
        .bind(intervention.finished_at().map(|t| *t.as_datetime()))
        .bind(report.outcome.as_str())
        .bind(report.arrival_time)
        .bind(report.departure_time)
        .bind(&report.difficulties)
        .bind(delay.late)
        .bind(delay.late_since.map(|t| *t.as_datetime()))
        .bind(delay.duration_secs)
        .bind(&delay.reason)
        .bind(delay.resolved)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update intervention", e))?;

        if result.rows_affected() == 0 {
            return Err(stale_or_missing(
                &self.pool,
                "interventions",
                *intervention.id().as_uuid(),
                intervention.version(),
                ErrorCode::InterventionNotFound,
            )
            .await);
        }
        Ok(())
    }

    async fn delete(&self, id: &InterventionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM interventions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete intervention", e))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::InterventionNotFound, "Intervention not found")
                    .with_detail("id", id.to_string()),
            );
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &InterventionId) -> Result<Option<Intervention>, DomainError> {
        let mut found = self
            .fetch_where("WHERE id = $1", Some(*id.as_uuid()), "Failed to fetch intervention")
            .await?;
        Ok(found.pop())
    }

    async fn find_by_intervenant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Intervention>, DomainError> {
        self.fetch_where(
            "WHERE intervenant_id = $1 ORDER BY scheduled_date, id",
            Some(*user_id.as_uuid()),
            "Failed to fetch interventions by intervenant",
        )
        .await
    }

    async fn find_detection_candidates(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Intervention>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE status <> $1 AND due_date < $2 AND NOT late ORDER BY due_date, id",
            SELECT_INTERVENTION
        ))
        .bind(InterventionStatus::Completed.as_str())
        .bind(today)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch detection candidates", e))?;

        rows.iter().map(row_to_intervention).collect()
    }

    async fn find_late_unresolved(&self) -> Result<Vec<Intervention>, DomainError> {
        self.fetch_where(
            "WHERE late AND NOT delay_resolved ORDER BY scheduled_date, id",
            None,
            "Failed to fetch late interventions",
        )
        .await
    }
}

fn row_to_intervention(row: &PgRow) -> Result<Intervention, DomainError> {
    let id: Uuid = column(row, "id")?;
    let mission_id: Uuid = column(row, "mission_id")?;
    let intervenant_id: Option<Uuid> = column(row, "intervenant_id")?;
    let created_by: Option<Uuid> = column(row, "created_by")?;
    let started_at: Option<DateTime<Utc>> = column(row, "started_at")?;
    let finished_at: Option<DateTime<Utc>> = column(row, "finished_at")?;
    let arrival_time: Option<NaiveTime> = column(row, "arrival_time")?;
    let departure_time: Option<NaiveTime> = column(row, "departure_time")?;
    let late_since: Option<DateTime<Utc>> = column(row, "late_since")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;

    let field_report = FieldReport {
        outcome: enum_column::<InterventionOutcome>(row, "outcome")?,
        arrival_time,
        departure_time,
        difficulties: column(row, "difficulties")?,
    };
    let delay = DelayFlags {
        late: column(row, "late")?,
        late_since: late_since.map(Timestamp::from_datetime),
        duration_secs: column(row, "delay_duration_secs")?,
        reason: column(row, "delay_reason")?,
        resolved: column(row, "delay_resolved")?,
    };

    Ok(Intervention::reconstitute(
        InterventionId::from_uuid(id),
        MissionId::from_uuid(mission_id),
        column(row, "title")?,
        intervenant_id.map(UserId::from_uuid),
        created_by.map(UserId::from_uuid),
        column(row, "scheduled_date")?,
        column(row, "due_date")?,
        enum_column::<Priority>(row, "priority")?,
        column(row, "resources")?,
        enum_column::<InterventionStatus>(row, "status")?,
        started_at.map(Timestamp::from_datetime),
        finished_at.map(Timestamp::from_datetime),
        field_report,
        delay,
        Timestamp::from_datetime(created_at),
        column(row, "version")?,
    ))
}
