//! PostgreSQL implementation of ReportRepository.
//!
//! `intervention_id` is unique: a second report for the same intervention
//! fails with `ReportAlreadyExists`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, db_error, enum_column, insert_error, stale_or_missing};
use crate::domain::foundation::{
    DomainError, ErrorCode, InterventionId, ReportId, ReportStatus, Timestamp, UserId,
};
use crate::domain::report::{InterventionReport, ReportContent};
use crate::ports::ReportRepository;

const SELECT_REPORT: &str = r#"
    SELECT id, intervention_id, works_done, final_result, resources_used,
           improvements, status, rejection_reason, validation_comment,
           validated_by, rejected_by, validated_at, created_at, updated_at, version
    FROM reports
"#;

#[derive(Clone)]
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn save(&self, report: &InterventionReport) -> Result<(), DomainError> {
        let content = report.content();
        sqlx::query(
            r#"
            INSERT INTO reports (
                id, intervention_id, works_done, final_result, resources_used,
                improvements, status, rejection_reason, validation_comment,
                validated_by, rejected_by, validated_at, created_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(report.id().as_uuid())
        .bind(report.intervention_id().as_uuid())
        .bind(&content.works_done)
        .bind(&content.final_result)
        .bind(&content.resources_used)
        .bind(&content.improvements)
        .bind(report.status().as_str())
        .bind(report.rejection_reason())
        .bind(report.validation_comment())
        .bind(report.validated_by().map(|id| *id.as_uuid()))
        .bind(report.rejected_by().map(|id| *id.as_uuid()))
        .bind(report.validated_at().map(|t| *t.as_datetime()))
        .bind(report.created_at().as_datetime())
        .bind(report.updated_at().as_datetime())
        .bind(report.version())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            insert_error("Failed to insert report", e, Some(ErrorCode::ReportAlreadyExists))
        })?;

        Ok(())
    }

    async fn update(&self, report: &InterventionReport) -> Result<(), DomainError> {
        let content = report.content();
        let result = sqlx::query(
            r#"
            UPDATE reports SET
                works_done = $3,
                final_result = $4,
                resources_used = $5,
                improvements = $6,
                status = $7,
                rejection_reason = $8,
                validation_comment = $9,
                validated_by = $10,
                rejected_by = $11,
                validated_at = $12,
                updated_at = $13,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(report.id().as_uuid())
        .bind(report.version())
        .bind(&content.works_done)
        .bind(&content.final_result)
        .bind(&content.resources_used)
        .bind(&content.improvements)
        .bind(report.status().as_str())
        .bind(report.rejection_reason())
        .bind(report.validation_comment())
        .bind(report.validated_by().map(|id| *id.as_uuid()))
        .bind(report.rejected_by().map(|id| *id.as_uuid()))
        .bind(report.validated_at().map(|t| *t.as_datetime()))
        .bind(report.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update report", e))?;

        if result.rows_affected() == 0 {
            return Err(stale_or_missing(
                &self.pool,
                "reports",
                *report.id().as_uuid(),
                report.version(),
                ErrorCode::ReportNotFound,
            )
            .await);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<InterventionReport>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_REPORT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch report", e))?;

        row.as_ref().map(row_to_report).transpose()
    }

    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Option<InterventionReport>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE intervention_id = $1", SELECT_REPORT))
            .bind(intervention_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch report by intervention", e))?;

        row.as_ref().map(row_to_report).transpose()
    }
}

fn row_to_report(row: &PgRow) -> Result<InterventionReport, DomainError> {
    let id: Uuid = column(row, "id")?;
    let intervention_id: Uuid = column(row, "intervention_id")?;
    let validated_by: Option<Uuid> = column(row, "validated_by")?;
    let rejected_by: Option<Uuid> = column(row, "rejected_by")?;
    let validated_at: Option<DateTime<Utc>> = column(row, "validated_at")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    let content = ReportContent {
        works_done: column(row, "works_done")?,
        final_result: column(row, "final_result")?,
        resources_used: column(row, "resources_used")?,
        improvements: column(row, "improvements")?,
    };

    Ok(InterventionReport::reconstitute(
        ReportId::from_uuid(id),
        InterventionId::from_uuid(intervention_id),
        content,
        enum_column::<ReportStatus>(row, "status")?,
        column(row, "rejection_reason")?,
        column(row, "validation_comment")?,
        validated_by.map(UserId::from_uuid),
        rejected_by.map(UserId::from_uuid),
        validated_at.map(Timestamp::from_datetime),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
        column(row, "version")?,
    ))
}
