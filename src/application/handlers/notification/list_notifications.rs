//! Inbox queries.

use std::sync::Arc;

use crate::domain::foundation::{Actor, WorkflowError};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

#[derive(Debug, Clone)]
pub struct ListNotificationsQuery {
    pub actor: Actor,
}

#[derive(Debug, Clone)]
pub struct UnreadCountQuery {
    pub actor: Actor,
}

pub struct ListNotificationsHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl ListNotificationsHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// The actor's notifications, newest first.
    pub async fn handle(
        &self,
        query: ListNotificationsQuery,
    ) -> Result<Vec<Notification>, WorkflowError> {
        Ok(self
            .notifications
            .find_by_recipient(&query.actor.user_id)
            .await?)
    }
}

pub struct UnreadCountHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl UnreadCountHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(&self, query: UnreadCountQuery) -> Result<u64, WorkflowError> {
        Ok(self.notifications.count_unread(&query.actor.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::TestWorld;
    use crate::domain::foundation::Role;
    use crate::domain::notification::NotificationKind;

    #[tokio::test]
    async fn lists_only_own_notifications_newest_first() {
        let world = TestWorld::new();
        let me = world.user("me", Role::Employee).await;
        let other = world.user("other", Role::Employee).await;
        let dispatcher = world.dispatcher();
        dispatcher
            .notify(&me.user_id, NotificationKind::MissionAssignment, "first")
            .await
            .unwrap();
        world.clock.advance_secs(60);
        dispatcher
            .notify(&me.user_id, NotificationKind::InterventionAssignment, "second")
            .await
            .unwrap();
        dispatcher
            .notify(&other.user_id, NotificationKind::Retard, "not mine")
            .await
            .unwrap();

        let inbox = ListNotificationsHandler::new(world.notifications.clone())
            .handle(ListNotificationsQuery { actor: me })
            .await
            .unwrap();
        let unread = UnreadCountHandler::new(world.notifications.clone())
            .handle(UnreadCountQuery { actor: me })
            .await
            .unwrap();

        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].message(), "second");
        assert_eq!(unread, 2);
    }
}
