//! Mission repository port.

use crate::domain::foundation::{DomainError, MissionId};
use crate::domain::mission::Mission;
use async_trait::async_trait;

/// Repository port for Mission aggregate persistence.
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Save a new mission.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, mission: &Mission) -> Result<(), DomainError>;

    /// Compare-and-swap update on `mission.version()`.
    ///
    /// # Errors
    ///
    /// - `MissionNotFound` if the mission doesn't exist
    /// - `ConcurrencyConflict` if the stored version differs
    /// - `DatabaseError` on persistence failure
    async fn update(&self, mission: &Mission) -> Result<(), DomainError>;

    /// Find a mission by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &MissionId) -> Result<Option<Mission>, DomainError>;
}
