//! HTTP handlers for report endpoints.

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
    CreateReportCommand, GetReportQuery, RejectReportCommand, SubmitReportCommand,
    UpdateReportCommand, ValidateReportCommand,
};

use super::dto::{ReportResponse, RejectReportRequest, ValidateReportRequest, WriteReportRequest};

/// POST /api/interventions/:id/report
pub async fn create_report(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<WriteReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateReportCommand {
        actor,
        intervention_id: parse_id(&id, "intervention")?,
        content: req.content.into(),
        submit: req.submit,
    };
    let report = state.create_report_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(ReportResponse::from(&report))))
}

/// GET /api/interventions/:id/report
pub async fn get_report(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetReportQuery {
        actor,
        intervention_id: parse_id(&id, "intervention")?,
    };
    let report = state.get_report_handler().handle(query).await?;
    Ok(Json(ReportResponse::from(&report)))
}

/// PUT /api/reports/:id
pub async fn update_report(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<WriteReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateReportCommand {
        actor,
        report_id: parse_id(&id, "report")?,
        content: req.content.into(),
        submit: req.submit,
    };
    let report = state.update_report_handler().handle(cmd).await?;
    Ok(Json(ReportResponse::from(&report)))
}

/// POST /api/reports/:id/submit
pub async fn submit_report(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SubmitReportCommand {
        actor,
        report_id: parse_id(&id, "report")?,
    };
    let report = state.submit_report_handler().handle(cmd).await?;
    Ok(Json(ReportResponse::from(&report)))
}

/// POST /api/reports/:id/validate
pub async fn validate_report(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<ValidateReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ValidateReportCommand {
        actor,
        report_id: parse_id(&id, "report")?,
        comment: req.comment,
    };
    let report = state.validate_report_handler().handle(cmd).await?;
    Ok(Json(ReportResponse::from(&report)))
}

/// POST /api/reports/:id/reject
pub async fn reject_report(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<RejectReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RejectReportCommand {
        actor,
        report_id: parse_id(&id, "report")?,
        reason: req.reason,
    };
    let report = state.reject_report_handler().handle(cmd).await?;
    Ok(Json(ReportResponse::from(&report)))
}
