//! DeleteNotificationHandler - removes one notification from the inbox.

use std::sync::Arc;

use crate::domain::foundation::{Actor, NotificationId, WorkflowError};
use crate::ports::NotificationRepository;

#[derive(Debug, Clone)]
pub struct DeleteNotificationCommand {
    pub actor: Actor,
    pub notification_id: NotificationId,
}

pub struct DeleteNotificationHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl DeleteNotificationHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(&self, cmd: DeleteNotificationCommand) -> Result<(), WorkflowError> {
        let notification = self
            .notifications
            .find_by_id(&cmd.notification_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Notification", cmd.notification_id))?;
        notification.ensure_recipient(&cmd.actor, "notification.delete")?;

        self.notifications.delete(&cmd.notification_id).await?;
        Ok(())
    }
}
