//! HTTP handlers for notification endpoints. All act on the caller's inbox.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireActor;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    DeleteNotificationCommand, ListNotificationsQuery, MarkAllNotificationsReadCommand,
    MarkNotificationReadCommand, UnreadCountQuery,
};
use crate::domain::foundation::NotificationId;

use super::dto::{MarkAllReadResponse, NotificationResponse, UnreadCountResponse};

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<impl IntoResponse, ApiError> {
    let notifications = state
        .list_notifications_handler()
        .handle(ListNotificationsQuery { actor })
        .await?;
    let body: Vec<NotificationResponse> =
        notifications.iter().map(NotificationResponse::from).collect();
    Ok(Json(body))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<impl IntoResponse, ApiError> {
    let unread = state
        .unread_count_handler()
        .handle(UnreadCountQuery { actor })
        .await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// POST /api/notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = MarkNotificationReadCommand {
        actor,
        notification_id: parse_id::<NotificationId>(&id, "notification")?,
    };
    let notification = state.mark_read_handler().handle(cmd).await?;
    Ok(Json(NotificationResponse::from(&notification)))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .mark_all_read_handler()
        .handle(MarkAllNotificationsReadCommand { actor })
        .await?;
    Ok(Json(MarkAllReadResponse { updated }))
}

/// DELETE /api/notifications/:id
pub async fn delete_notification(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteNotificationCommand {
        actor,
        notification_id: parse_id(&id, "notification")?,
    };
    state.delete_notification_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
