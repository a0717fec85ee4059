//! Read-flag commands.

use std::sync::Arc;

use crate::domain::foundation::{Actor, NotificationId, Versioned, WorkflowError};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

#[derive(Debug, Clone)]
pub struct MarkNotificationReadCommand {
    pub actor: Actor,
    pub notification_id: NotificationId,
}

#[derive(Debug, Clone)]
pub struct MarkAllNotificationsReadCommand {
    pub actor: Actor,
}

pub struct MarkNotificationReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkNotificationReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Marking an already read notification is a no-op.
    pub async fn handle(
        &self,
        cmd: MarkNotificationReadCommand,
    ) -> Result<Notification, WorkflowError> {
        let mut notification = self
            .notifications
            .find_by_id(&cmd.notification_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Notification", cmd.notification_id))?;
        notification.ensure_recipient(&cmd.actor, "notification.read")?;

        if !notification.mark_read() {
            return Ok(notification);
        }
        self.notifications.update(&notification).await?;
        Ok(notification.next_version())
    }
}

pub struct MarkAllNotificationsReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkAllNotificationsReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Returns how many notifications changed.
    pub async fn handle(&self, cmd: MarkAllNotificationsReadCommand) -> Result<u64, WorkflowError> {
        Ok(self.notifications.mark_all_read(&cmd.actor.user_id).await?)
    }
}
