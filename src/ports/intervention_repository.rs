//! Intervention repository port.
//!
//! # Design
//!
//! - **Per-record consistency**: `update` is a compare-and-swap on the
//!   aggregate version, so a detection pass and a user action racing on
//!   the same intervention cannot silently overwrite each other
//! - **Detection query**: the selection predicate is pushed to the store

use crate::domain::foundation::{DomainError, InterventionId, UserId};
use crate::domain::intervention::Intervention;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Repository port for Intervention aggregate persistence.
#[async_trait]
pub trait InterventionRepository: Send + Sync {
    /// Save a new intervention.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, intervention: &Intervention) -> Result<(), DomainError>;

    /// Compare-and-swap update on `intervention.version()`.
    ///
    /// Stores the intervention with version + 1.
    ///
    /// # Errors
    ///
    /// - `InterventionNotFound` if the intervention doesn't exist
    /// - `ConcurrencyConflict` if the stored version differs
    /// - `DatabaseError` on persistence failure
    async fn update(&self, intervention: &Intervention) -> Result<(), DomainError>;

    /// Delete an intervention.
    ///
    /// # Errors
    ///
    /// - `InterventionNotFound` if the intervention doesn't exist
    async fn delete(&self, id: &InterventionId) -> Result<(), DomainError>;

    /// Find an intervention by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &InterventionId) -> Result<Option<Intervention>, DomainError>;

    /// Interventions assigned to a user, ordered by scheduled date.
    async fn find_by_intervenant(&self, user_id: &UserId)
        -> Result<Vec<Intervention>, DomainError>;

    /// Open, unflagged interventions whose due date is before `today`,
    /// ordered by due date.
    async fn find_detection_candidates(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Intervention>, DomainError>;

    /// Interventions currently late with the delay not resolved.
    async fn find_late_unresolved(&self) -> Result<Vec<Intervention>, DomainError>;
}
