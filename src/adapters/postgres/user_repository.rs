//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, db_error, enum_column};
use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

const SELECT_USER: &str =
    "SELECT id, username, first_name, last_name, email, role FROM users";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, first_name, last_name, email, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                role = EXCLUDED.role
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.email())
        .bind(user.role().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save user", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!("{} WHERE role = $1 ORDER BY username", SELECT_USER))
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch users by role", e))?;

        rows.iter().map(row_to_user).collect()
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: Uuid = column(row, "id")?;
    Ok(User::reconstitute(
        UserId::from_uuid(id),
        column(row, "username")?,
        column(row, "first_name")?,
        column(row, "last_name")?,
        column(row, "email")?,
        enum_column::<Role>(row, "role")?,
    ))
}
