use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{compare_and_swap, insert_new};
use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, UserId, Versioned};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<RwLock<HashMap<NotificationId, Notification>>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored notification, oldest first. Test helper.
    pub async fn all(&self) -> Vec<Notification> {
        let rows = self.notifications.read().await;
        let mut all: Vec<Notification> = rows.values().cloned().collect();
        all.sort_by(|a, b| a.created_at().cmp(b.created_at()).then(a.id().cmp(b.id())));
        all
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        let mut rows = self.notifications.write().await;
        insert_new(&mut rows, *notification.id(), notification.clone())
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        let mut rows = self.notifications.write().await;
        compare_and_swap(
            &mut rows,
            *notification.id(),
            notification,
            ErrorCode::NotificationNotFound,
        )
    }

    async fn delete(&self, id: &NotificationId) -> Result<(), DomainError> {
        match self.notifications.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(
                DomainError::new(ErrorCode::NotificationNotFound, "Notification not found")
                    .with_detail("id", id.to_string()),
            ),
        }
    }

    async fn find_by_id(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError> {
        Ok(self.notifications.read().await.get(id).cloned())
    }

    async fn find_by_recipient(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        let rows = self.notifications.read().await;
        let mut found: Vec<Notification> = rows
            .values()
            .filter(|n| n.recipient_id() == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at().cmp(a.created_at()).then(b.id().cmp(a.id())));
        Ok(found)
    }

    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut rows = self.notifications.write().await;
        let mut changed = 0;
        for notification in rows.values_mut().filter(|n| n.recipient_id() == user_id) {
            let mut next = notification.next_version();
            if next.mark_read() {
                *notification = next;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn count_unread(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let rows = self.notifications.read().await;
        Ok(rows
            .values()
            .filter(|n| n.recipient_id() == user_id && !n.is_read())
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::notification::NotificationKind;

    fn note(recipient: UserId, secs: i64) -> Notification {
        Notification::new(
            NotificationId::new(),
            recipient,
            NotificationKind::Retard,
            "m",
            Timestamp::from_unix_secs(secs),
        )
    }

    #[tokio::test]
    async fn find_by_recipient_is_newest_first() {
        let repo = InMemoryNotificationRepository::new();
        let user = UserId::new();
        let old = note(user, 100);
        let new = note(user, 200);
        repo.save(&old).await.unwrap();
        repo.save(&new).await.unwrap();
        repo.save(&note(UserId::new(), 300)).await.unwrap();

        let found = repo.find_by_recipient(&user).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id(), new.id());
    }

    #[tokio::test]
    async fn mark_all_read_counts_changes() {
        let repo = InMemoryNotificationRepository::new();
        let user = UserId::new();
        repo.save(&note(user, 1)).await.unwrap();
        repo.save(&note(user, 2)).await.unwrap();

        assert_eq!(repo.count_unread(&user).await.unwrap(), 2);
        assert_eq!(repo.mark_all_read(&user).await.unwrap(), 2);
        assert_eq!(repo.mark_all_read(&user).await.unwrap(), 0);
        assert_eq!(repo.count_unread(&user).await.unwrap(), 0);
    }
}
