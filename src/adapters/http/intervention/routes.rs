//! HTTP routes for intervention endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    add_attachment, create_intervention, delete_intervention, finish_intervention,
    get_intervention, manage_delay, remove_attachment, start_intervention, submit_field_report,
    update_intervention,
};
use crate::adapters::http::state::AppState;

/// Intervention lifecycle, field report and attachments.
pub fn intervention_routes() -> Router<AppState> {
    Router::new()
        .route("/interventions", post(create_intervention))
        .route(
            "/interventions/:id",
            get(get_intervention)
                .patch(update_intervention)
                .delete(delete_intervention),
        )
        .route("/interventions/:id/start", post(start_intervention))
        .route("/interventions/:id/finish", post(finish_intervention))
        .route("/interventions/:id/field-report", post(submit_field_report))
        .route("/interventions/:id/delay", post(manage_delay))
        .route("/interventions/:id/attachments", post(add_attachment))
        .route("/attachments/:id", delete(remove_attachment))
}
