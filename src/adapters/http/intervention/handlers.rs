//! HTTP handlers for intervention endpoints.

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
    AddAttachmentCommand, CreateInterventionCommand, DeleteInterventionCommand,
    FinishInterventionCommand, GetInterventionQuery, ManageInterventionDelayCommand,
    RemoveAttachmentCommand, StartInterventionCommand, SubmitFieldReportCommand,
    UpdateInterventionCommand,
};
use crate::domain::foundation::{AttachmentId, InterventionId};

use super::dto::{
    AddAttachmentRequest, AttachmentResponse, CreateInterventionRequest,
    FieldReportRequest, InterventionDetailResponse, InterventionResponse, ManageDelayRequest,
    UpdateInterventionRequest,
};

/// POST /api/interventions
pub async fn create_intervention(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Json(req): Json<CreateInterventionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateInterventionCommand {
        actor,
        fields: req.into(),
    };
    let intervention = state.create_intervention_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(InterventionResponse::from(&intervention)),
    ))
}

/// GET /api/interventions/:id
///
/// Runs the delay check before answering.
pub async fn get_intervention(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetInterventionQuery {
        actor,
        intervention_id: parse_id::<InterventionId>(&id, "intervention")?,
    };
    let view = state.get_intervention_handler().handle(query).await?;
    Ok(Json(InterventionDetailResponse::from(view)))
}

/// PATCH /api/interventions/:id
pub async fn update_intervention(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<UpdateInterventionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateInterventionCommand {
        actor,
        intervention_id: parse_id(&id, "intervention")?,
        changes: req.into(),
    };
    let intervention = state.update_intervention_handler().handle(cmd).await?;
    Ok(Json(InterventionResponse::from(&intervention)))
}

/// DELETE /api/interventions/:id
pub async fn delete_intervention(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteInterventionCommand {
        actor,
        intervention_id: parse_id(&id, "intervention")?,
    };
    state.delete_intervention_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/interventions/:id/start
pub async fn start_intervention(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = StartInterventionCommand {
        actor,
        intervention_id: parse_id(&id, "intervention")?,
    };
    let intervention = state.start_intervention_handler().handle(cmd).await?;
    Ok(Json(InterventionResponse::from(&intervention)))
}

/// POST /api/interventions/:id/finish
pub async fn finish_intervention(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = FinishInterventionCommand {
        actor,
        intervention_id: parse_id(&id, "intervention")?,
    };
    let intervention = state.finish_intervention_handler().handle(cmd).await?;
    Ok(Json(InterventionResponse::from(&intervention)))
}

/// POST /api/interventions/:id/field-report
pub async fn submit_field_report(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<FieldReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SubmitFieldReportCommand {
        actor,
        intervention_id: parse_id(&id, "intervention")?,
        report: req.into(),
    };
    let intervention = state.submit_field_report_handler().handle(cmd).await?;
    Ok(Json(InterventionResponse::from(&intervention)))
}

/// POST /api/interventions/:id/delay
pub async fn manage_delay(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<ManageDelayRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ManageInterventionDelayCommand {
        actor,
        intervention_id: parse_id(&id, "intervention")?,
        reason: req.reason,
        resolved: req.resolved,
    };
    let intervention = state.manage_delay_handler().handle(cmd).await?;
    Ok(Json(InterventionResponse::from(&intervention)))
}

/// POST /api/interventions/:id/attachments
pub async fn add_attachment(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<AddAttachmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = AddAttachmentCommand {
        actor,
        intervention_id: parse_id(&id, "intervention")?,
        title: req.title,
        file_ref: req.file_ref,
        kind: req.kind,
        description: req.description,
    };
    let attachment = state.add_attachment_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(AttachmentResponse::from(&attachment))))
}

/// DELETE /api/attachments/:id
pub async fn remove_attachment(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RemoveAttachmentCommand {
        actor,
        attachment_id: parse_id::<AttachmentId>(&id, "attachment")?,
    };
    state.remove_attachment_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
