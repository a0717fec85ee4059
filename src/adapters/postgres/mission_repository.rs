//! PostgreSQL implementation of MissionRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, db_error, enum_column, stale_or_missing};
use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, MissionId, MissionStatus, Timestamp, UserId,
};
use crate::domain::mission::Mission;
use crate::ports::MissionRepository;

#[derive(Clone)]
pub struct PostgresMissionRepository {
    pool: PgPool,
}

impl PostgresMissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MissionRepository for PostgresMissionRepository {
    async fn save(&self, mission: &Mission) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO missions (
                id, client_id, title, description, nature, start_date, place,
                frequency, assignee_id, status, created_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(mission.id().as_uuid())
        .bind(mission.client_id().as_uuid())
        .bind(mission.title())
        .bind(mission.description())
        .bind(mission.nature())
        .bind(mission.start_date())
        .bind(mission.place())
        .bind(mission.frequency())
        .bind(mission.assignee_id().map(|id| *id.as_uuid()))
        .bind(mission.status().as_str())
        .bind(mission.created_at().as_datetime())
        .bind(mission.version())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert mission", e))?;

        Ok(())
    }

    async fn update(&self, mission: &Mission) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE missions SET
                title = $3,
                description = $4,
                nature = $5,
                start_date = $6,
                place = $7,
                frequency = $8,
                assignee_id = $9,
                status = $10,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(mission.id().as_uuid())
        .bind(mission.version())
        .bind(mission.title())
        .bind(mission.description())
        .bind(mission.nature())
        .bind(mission.start_date())
        .bind(mission.place())
        .bind(mission.frequency())
        .bind(mission.assignee_id().map(|id| *id.as_uuid()))
        .bind(mission.status().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update mission", e))?;

        if result.rows_affected() == 0 {
            return Err(stale_or_missing(
                &self.pool,
                "missions",
                *mission.id().as_uuid(),
                mission.version(),
                ErrorCode::MissionNotFound,
            )
            .await);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &MissionId) -> Result<Option<Mission>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, client_id, title, description, nature, start_date, place,
                   frequency, assignee_id, status, created_at, version
            FROM missions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch mission", e))?;

        row.as_ref().map(row_to_mission).transpose()
    }
}

fn row_to_mission(row: &PgRow) -> Result<Mission, DomainError> {
    let id: Uuid = column(row, "id")?;
    let client_id: Uuid = column(row, "client_id")?;
    let start_date: NaiveDate = column(row, "start_date")?;
    let assignee_id: Option<Uuid> = column(row, "assignee_id")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;

    Ok(Mission::reconstitute(
        MissionId::from_uuid(id),
        ClientId::from_uuid(client_id),
        column(row, "title")?,
        column(row, "description")?,
        column(row, "nature")?,
        start_date,
        column(row, "place")?,
        column(row, "frequency")?,
        assignee_id.map(UserId::from_uuid),
        enum_column::<MissionStatus>(row, "status")?,
        Timestamp::from_datetime(created_at),
        column(row, "version")?,
    ))
}
