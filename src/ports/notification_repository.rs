//! Notification repository port.

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;
use async_trait::async_trait;

/// Repository port for Notification persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Save a new notification.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Compare-and-swap update on `notification.version()`.
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if the notification doesn't exist
    /// - `ConcurrencyConflict` if the stored version differs
    async fn update(&self, notification: &Notification) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `NotificationNotFound` if the notification doesn't exist
    async fn delete(&self, id: &NotificationId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError>;

    /// A user's notifications, newest first.
    async fn find_by_recipient(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError>;

    /// Marks every unread notification of a user read.
    ///
    /// Returns the number of notifications changed.
    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64, DomainError>;

    async fn count_unread(&self, user_id: &UserId) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn NotificationRepository) {}
    }
}
