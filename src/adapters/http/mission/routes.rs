//! HTTP routes for mission endpoints.

use axum::{routing::post, Router};

use super::handlers::{assign_mission, complete_mission, create_mission};
use crate::adapters::http::state::AppState;

pub fn mission_routes() -> Router<AppState> {
    Router::new()
        .route("/missions", post(create_mission))
        .route("/missions/:id/assign", post(assign_mission))
        .route("/missions/:id/complete", post(complete_mission))
}
