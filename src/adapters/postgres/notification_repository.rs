//! PostgreSQL implementation of NotificationRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, db_error, enum_column, stale_or_missing};
use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, Timestamp, UserId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::NotificationRepository;

const SELECT_NOTIFICATION: &str = r#"
    SELECT id, recipient_id, message, kind, read, created_at, version
    FROM notifications
"#;

#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, recipient_id, message, kind, read, created_at, version)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notification.id().as_uuid())
        .bind(notification.recipient_id().as_uuid())
        .bind(notification.message())
        .bind(notification.kind().as_str())
        .bind(notification.is_read())
        .bind(notification.created_at().as_datetime())
        .bind(notification.version())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert notification", e))?;

        Ok(())
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET read = $3, version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(notification.id().as_uuid())
        .bind(notification.version())
        .bind(notification.is_read())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update notification", e))?;

        if result.rows_affected() == 0 {
            return Err(stale_or_missing(
                &self.pool,
                "notifications",
                *notification.id().as_uuid(),
                notification.version(),
                ErrorCode::NotificationNotFound,
            )
            .await);
        }
        Ok(())
    }

    async fn delete(&self, id: &NotificationId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete notification", e))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::NotificationNotFound, "Notification not found")
                    .with_detail("id", id.to_string()),
            );
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_NOTIFICATION))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch notification", e))?;

        row.as_ref().map(row_to_notification).transpose()
    }

    async fn find_by_recipient(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE recipient_id = $1 ORDER BY created_at DESC, id DESC",
            SELECT_NOTIFICATION
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch notifications", e))?;

        rows.iter().map(row_to_notification).collect()
    }

    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE, version = version + 1
            WHERE recipient_id = $1 AND NOT read
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark notifications read", e))?;

        Ok(result.rows_affected())
    }

    async fn count_unread(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND NOT read",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count unread notifications", e))?;

        Ok(count.max(0) as u64)
    }
}

fn row_to_notification(row: &PgRow) -> Result<Notification, DomainError> {
    let id: Uuid = column(row, "id")?;
    let recipient_id: Uuid = column(row, "recipient_id")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;

    Ok(Notification::reconstitute(
        NotificationId::from_uuid(id),
        UserId::from_uuid(recipient_id),
        column(row, "message")?,
        enum_column::<NotificationKind>(row, "kind")?,
        column(row, "read")?,
        Timestamp::from_datetime(created_at),
        column(row, "version")?,
    ))
}
