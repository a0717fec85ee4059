//! Notification module - per-user event records.
//!
//! Notifications are produced only as side effects of state transitions.
//! Apart from the read flag they never change.

mod aggregate;
mod kind;
pub mod messages;

pub use aggregate::Notification;
pub use kind::NotificationKind;
