//! In-memory record store.
//!
//! Implements every repository port on `tokio::sync::RwLock<HashMap>`.
//! Used by the test suite and for local runs without a database.
//! Updates follow the same compare-and-swap contract as PostgreSQL.

mod attachment_repository;
mod delay_repository;
mod intervention_repository;
mod mission_repository;
mod notification_repository;
mod report_repository;
mod user_repository;

pub use attachment_repository::InMemoryAttachmentRepository;
pub use delay_repository::InMemoryDelayRepository;
pub use intervention_repository::InMemoryInterventionRepository;
pub use mission_repository::InMemoryMissionRepository;
pub use notification_repository::InMemoryNotificationRepository;
pub use report_repository::InMemoryReportRepository;
pub use user_repository::InMemoryUserRepository;

use std::collections::HashMap;
use std::hash::Hash;

use crate::domain::foundation::{DomainError, ErrorCode, Versioned};

/// Replaces the stored row if its version matches the incoming one.
///
/// The stored copy is stamped with the next version.
fn compare_and_swap<K, V>(
    rows: &mut HashMap<K, V>,
    key: K,
    incoming: &V,
    not_found: ErrorCode,
) -> Result<(), DomainError>
where
    K: Eq + Hash + ToString,
    V: Versioned,
{
    let Some(current) = rows.get(&key) else {
        return Err(DomainError::new(not_found, "Record not found")
            .with_detail("id", key.to_string()));
    };
    if current.version() != incoming.version() {
        return Err(DomainError::new(
            ErrorCode::ConcurrencyConflict,
            format!(
                "Record {} was modified concurrently (expected version {}, found {})",
                key.to_string(),
                incoming.version(),
                current.version()
            ),
        ));
    }
    rows.insert(key, incoming.next_version());
    Ok(())
}

/// Fails if a key is already present.
fn insert_new<K, V>(rows: &mut HashMap<K, V>, key: K, value: V) -> Result<(), DomainError>
where
    K: Eq + Hash + ToString,
{
    if rows.contains_key(&key) {
        return Err(DomainError::database(format!(
            "duplicate key value: {}",
            key.to_string()
        )));
    }
    rows.insert(key, value);
    Ok(())
}
