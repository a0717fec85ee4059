//! HTTP adapter for the delay detection engine (administrators only).
//!
//! - `POST /detection/run` - flag every overdue intervention now
//! - `GET /detection/preview` - list what a run would flag

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::intervention::InterventionResponse;
use crate::adapters::http::middleware::RequireActor;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    DetectionRunResult, PreviewDelayDetectionCommand, RunDelayDetectionCommand,
};

#[derive(Debug, Clone, Serialize)]
pub struct DetectionRunResponse {
    pub date: NaiveDate,
    pub flagged_count: usize,
    pub flagged: Vec<InterventionResponse>,
}

impl From<DetectionRunResult> for DetectionRunResponse {
    fn from(result: DetectionRunResult) -> Self {
        Self {
            date: result.today,
            flagged_count: result.count(),
            flagged: result.flagged.iter().map(InterventionResponse::from).collect(),
        }
    }
}

/// POST /api/detection/run
pub async fn run_detection(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .detect_overdue_handler()
        .handle(RunDelayDetectionCommand { actor })
        .await?;
    Ok(Json(DetectionRunResponse::from(result)))
}

/// GET /api/detection/preview
pub async fn preview_detection(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<impl IntoResponse, ApiError> {
    let candidates = state
        .detect_overdue_handler()
        .preview(PreviewDelayDetectionCommand { actor })
        .await?;
    let body: Vec<InterventionResponse> =
        candidates.iter().map(InterventionResponse::from).collect();
    Ok(Json(body))
}

pub fn detection_routes() -> Router<AppState> {
    Router::new()
        .route("/detection/run", post(run_detection))
        .route("/detection/preview", get(preview_detection))
}
