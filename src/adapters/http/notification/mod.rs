//! HTTP adapter for the caller's notification inbox.

mod dto;
mod handlers;
mod routes;

pub use dto::{MarkAllReadResponse, NotificationResponse, UnreadCountResponse};
pub use routes::notification_routes;
