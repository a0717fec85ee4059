//! PostgreSQL implementation of AttachmentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, db_error, enum_column};
use crate::domain::attachment::{Attachment, AttachmentKind};
use crate::domain::foundation::{AttachmentId, DomainError, ErrorCode, InterventionId, Timestamp};
use crate::ports::AttachmentRepository;

const SELECT_ATTACHMENT: &str = r#"
    SELECT id, intervention_id, title, file_ref, kind, description, added_at
    FROM attachments
"#;

#[derive(Clone)]
pub struct PostgresAttachmentRepository {
    pool: PgPool,
}

impl PostgresAttachmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttachmentRepository for PostgresAttachmentRepository {
    async fn save(&self, attachment: &Attachment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO attachments (
                id, intervention_id, title, file_ref, kind, description, added_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(attachment.id().as_uuid())
        .bind(attachment.intervention_id().as_uuid())
        .bind(attachment.title())
        .bind(attachment.file_ref())
        .bind(attachment.kind().as_str())
        .bind(attachment.description())
        .bind(attachment.added_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert attachment", e))?;

        Ok(())
    }

    async fn delete(&self, id: &AttachmentId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM attachments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete attachment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::AttachmentNotFound, "Attachment not found")
                .with_detail("id", id.to_string()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &AttachmentId) -> Result<Option<Attachment>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_ATTACHMENT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch attachment", e))?;

        row.as_ref().map(row_to_attachment).transpose()
    }

    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Vec<Attachment>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE intervention_id = $1 ORDER BY added_at",
            SELECT_ATTACHMENT
        ))
        .bind(intervention_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch attachments by intervention", e))?;

        rows.iter().map(row_to_attachment).collect()
    }
}

fn row_to_attachment(row: &PgRow) -> Result<Attachment, DomainError> {
    let id: Uuid = column(row, "id")?;
    let intervention_id: Uuid = column(row, "intervention_id")?;
    let added_at: DateTime<Utc> = column(row, "added_at")?;
    Ok(Attachment::reconstitute(
        AttachmentId::from_uuid(id),
        InterventionId::from_uuid(intervention_id),
        column(row, "title")?,
        column(row, "file_ref")?,
        enum_column::<AttachmentKind>(row, "kind")?,
        column(row, "description")?,
        Timestamp::from_datetime(added_at),
    ))
}
