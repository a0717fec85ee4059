//! Notification dispatcher.
//!
//! Persists one notification per recipient. Organisation-wide events fan
//! out to every administrator: N administrators, N records.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, NotificationId, Role, UserId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::{Clock, NotificationRepository, UserRepository};

/// Writes notification records for state transitions.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifications: Arc<dyn NotificationRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl NotificationDispatcher {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            notifications,
            users,
            clock,
        }
    }

    /// Notifies one user.
    pub async fn notify(
        &self,
        recipient: &UserId,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> Result<Notification, DomainError> {
        let notification = Notification::new(
            NotificationId::new(),
            *recipient,
            kind,
            message,
            self.clock.now(),
        );
        self.notifications.save(&notification).await?;
        tracing::debug!(
            recipient = %recipient,
            kind = %kind,
            "notification dispatched"
        );
        Ok(notification)
    }

    /// Notifies every administrator except `except`.
    ///
    /// Returns the number of notifications written.
    pub async fn notify_admins(
        &self,
        kind: NotificationKind,
        message: &str,
        except: Option<&UserId>,
    ) -> Result<usize, DomainError> {
        let admins = self.users.find_by_role(Role::Administrator).await?;
        let mut sent = 0;
        for admin in admins.iter().filter(|a| Some(a.id()) != except) {
            self.notify(admin.id(), kind, message).await?;
            sent += 1;
        }
        Ok(sent)
    }

    /// First administrator by username, used as a fallback recipient.
    pub async fn first_admin(&self) -> Result<Option<UserId>, DomainError> {
        let admins = self.users.find_by_role(Role::Administrator).await?;
        Ok(admins.first().map(|a| *a.id()))
    }
}
