//! Delay repository port.

use crate::domain::delay::Delay;
use crate::domain::foundation::{DelayId, DomainError, InterventionId, UserId};
use async_trait::async_trait;

/// Repository port for Delay persistence.
///
/// Listing methods return delays newest first (by creation time).
#[async_trait]
pub trait DelayRepository: Send + Sync {
    /// Save a new delay.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, delay: &Delay) -> Result<(), DomainError>;

    /// Compare-and-swap update on `delay.version()`.
    ///
    /// # Errors
    ///
    /// - `DelayNotFound` if the delay doesn't exist
    /// - `ConcurrencyConflict` if the stored version differs
    async fn update(&self, delay: &Delay) -> Result<(), DomainError>;

    /// Find a delay by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &DelayId) -> Result<Option<Delay>, DomainError>;

    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Vec<Delay>, DomainError>;

    async fn find_by_responsible(&self, user_id: &UserId) -> Result<Vec<Delay>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Delay>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn DelayRepository) {}
    }
}
