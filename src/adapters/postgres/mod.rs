//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! Every mutable table carries a `version` column. `UPDATE` statements
//! match on `(id, version)` and bump it, so a stale write affects zero
//! rows and surfaces as `ConcurrencyConflict`.

mod attachment_repository;
mod delay_repository;
mod intervention_repository;
mod mission_repository;
mod notification_repository;
mod report_repository;
mod user_repository;

pub use attachment_repository::PostgresAttachmentRepository;
pub use delay_repository::PostgresDelayRepository;
pub use intervention_repository::PostgresInterventionRepository;
pub use mission_repository::PostgresMissionRepository;
pub use notification_repository::PostgresNotificationRepository;
pub use report_repository::PostgresReportRepository;
pub use user_repository::PostgresUserRepository;

use std::fmt::Display;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow, Postgres};
use sqlx::{Decode, Row, Type};
use uuid::Uuid;

use crate::config::{DatabaseConfig, RecordStore};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Opens the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let url = match config.store() {
        RecordStore::Postgres(url) => url,
        RecordStore::InMemory => {
            return Err(DomainError::database("No database URL configured"));
        }
    };
    let options = PgConnectOptions::from_str(url)
        .map_err(|e| db_error("Invalid database URL", e))?
        .application_name(&config.application_name);

    let pool = &config.pool;
    PgPoolOptions::new()
        .min_connections(pool.min_connections)
        .max_connections(pool.max_connections)
        .acquire_timeout(pool.acquire_timeout())
        .idle_timeout(pool.idle_timeout())
        .max_lifetime(pool.max_lifetime())
        .connect_with(options)
        .await
        .map_err(|e| db_error("Failed to create connection pool", e))
}

/// Applies pending migrations from `migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Migration failed: {}", e)))
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_error(context: &str, e: impl Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Reads a column, mapping decode failures to `DatabaseError`.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| db_error(&format!("Failed to get {}", name), e))
}

/// Reads a text column holding an enum's wire name.
fn enum_column<T>(row: &PgRow, name: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = column(row, name)?;
    raw.parse()
        .map_err(|e| db_error(&format!("Invalid {} '{}'", name, raw), e))
}

/// Builds the error for an `UPDATE` that matched no row.
///
/// Distinguishes a vanished record from a version mismatch.
async fn stale_or_missing(
    pool: &PgPool,
    table: &'static str,
    id: Uuid,
    expected_version: i64,
    not_found: ErrorCode,
) -> DomainError {
    let query = format!("SELECT version FROM {} WHERE id = $1", table);
    match sqlx::query_scalar::<_, i64>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
    {
        Ok(Some(current)) => DomainError::new(
            ErrorCode::ConcurrencyConflict,
            format!(
                "Record {} was modified concurrently (expected version {}, found {})",
                id, expected_version, current
            ),
        ),
        Ok(None) => {
            DomainError::new(not_found, "Record not found").with_detail("id", id.to_string())
        }
        Err(e) => db_error("Failed to check record version", e),
    }
}

/// Maps a unique-key violation on insert to a domain code.
fn insert_error(context: &str, e: sqlx::Error, duplicate: Option<ErrorCode>) -> DomainError {
    if let (Some(code), sqlx::Error::Database(db)) = (duplicate, &e) {
        if db.is_unique_violation() {
            return DomainError::new(code, format!("{}: {}", context, db.message()));
        }
    }
    db_error(context, e)
}
