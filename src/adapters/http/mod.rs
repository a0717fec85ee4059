//! HTTP adapters - REST API over the application handlers.
//!
//! Every route under `/api` requires an `X-User-Id` header naming a known
//! user. `/health` is open.

pub mod delay;
pub mod detection;
mod error;
pub mod intervention;
pub mod middleware;
pub mod mission;
pub mod notification;
pub mod report;
mod state;

pub use error::{parse_id, status_for, ApiError, ErrorResponse};
pub use state::AppState;

use std::time::Duration;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::json;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use self::middleware::{identity_middleware, IdentityState};

/// Full application router.
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let identity: IdentityState = state.users.clone();

    let api = Router::new()
        .merge(mission::mission_routes())
        .merge(intervention::intervention_routes())
        .merge(report::report_routes())
        .merge(delay::delay_routes())
        .merge(detection::detection_routes())
        .merge(notification::notification_routes())
        .layer(from_fn_with_state(identity, identity_middleware))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
