//! HTTP routes for report endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    create_report, get_report, reject_report, submit_report, update_report, validate_report,
};
use crate::adapters::http::state::AppState;

/// Report authoring and review.
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/interventions/:id/report",
            get(get_report).post(create_report),
        )
        .route("/reports/:id", put(update_report))
        .route("/reports/:id/submit", post(submit_report))
        .route("/reports/:id/validate", post(validate_report))
        .route("/reports/:id/reject", post(reject_report))
}
