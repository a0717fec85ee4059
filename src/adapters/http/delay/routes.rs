//! HTTP routes for delay endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_delay, delay_dashboard, get_delay, list_delays, resolve_delay, update_delay,
};
use crate::adapters::http::state::AppState;

pub fn delay_routes() -> Router<AppState> {
    Router::new()
        .route("/interventions/:id/delays", post(create_delay))
        .route("/delays", get(list_delays))
        .route("/delays/dashboard", get(delay_dashboard))
        .route("/delays/:id", get(get_delay).patch(update_delay))
        .route("/delays/:id/resolve", post(resolve_delay))
}
