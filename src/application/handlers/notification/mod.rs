//! Notification inbox handlers. Every operation is restricted to the
//! recipient.

mod delete_notification;
mod list_notifications;
mod mark_read;

pub use delete_notification::{DeleteNotificationCommand, DeleteNotificationHandler};
pub use list_notifications::{
    ListNotificationsHandler, ListNotificationsQuery, UnreadCountHandler, UnreadCountQuery,
};
pub use mark_read::{
    MarkAllNotificationsReadCommand, MarkAllNotificationsReadHandler, MarkNotificationReadCommand,
    MarkNotificationReadHandler,
};
