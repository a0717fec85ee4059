//! Notification entity.

use serde::{Deserialize, Serialize};

use super::NotificationKind;
use crate::domain::foundation::authorization::require_ownership;
use crate::domain::foundation::{
    impl_versioned, Actor, DomainError, NotificationId, Timestamp, UserId,
};

/// A message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient_id: UserId,
    message: String,
    kind: NotificationKind,
    read: bool,
    created_at: Timestamp,
    version: i64,
}

impl Notification {
    /// Creates an unread notification.
    pub fn new(
        id: NotificationId,
        recipient_id: UserId,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            recipient_id,
            message: message.into(),
            kind,
            read: false,
            created_at: now,
            version: 0,
        }
    }

    /// Reconstitute a notification from persistence.
    pub fn reconstitute(
        id: NotificationId,
        recipient_id: UserId,
        message: String,
        kind: NotificationKind,
        read: bool,
        created_at: Timestamp,
        version: i64,
    ) -> Self {
        Self {
            id,
            recipient_id,
            message,
            kind,
            read,
            created_at,
            version,
        }
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn recipient_id(&self) -> &UserId {
        &self.recipient_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// Fails unless the actor is the recipient.
    pub fn ensure_recipient(&self, actor: &Actor, action: &'static str) -> Result<(), DomainError> {
        require_ownership(actor, Some(&self.recipient_id), action)
    }

    /// Marks the notification read. Returns false if it already was.
    ///
    /// Callers check `ensure_recipient` first.
    pub fn mark_read(&mut self) -> bool {
        if self.read {
            return false;
        }
        self.read = true;
        true
    }
}

impl_versioned!(Notification);
