//! HTTP routes for notification endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    delete_notification, list_notifications, mark_all_read, mark_read, unread_count,
};
use crate::adapters::http::state::AppState;

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/read-all", post(mark_all_read))
        .route("/notifications/:id", delete(delete_notification))
        .route("/notifications/:id/read", post(mark_read))
}
