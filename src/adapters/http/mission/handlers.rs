//! HTTP handlers for mission endpoints.

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
    AssignMissionCommand, CompleteMissionCommand, CreateMissionCommand,
};
use crate::domain::foundation::MissionId;

use super::dto::{AssignMissionRequest, CreateMissionRequest, MissionResponse};

/// POST /api/missions
pub async fn create_mission(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Json(req): Json<CreateMissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateMissionCommand {
        actor,
        fields: req.into(),
    };
    let mission = state.create_mission_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(MissionResponse::from(&mission))))
}

/// POST /api/missions/:id/assign
pub async fn assign_mission(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<AssignMissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = AssignMissionCommand {
        actor,
        mission_id: parse_id::<MissionId>(&id, "mission")?,
        assignee_id: req.assignee_id,
    };
    let mission = state.assign_mission_handler().handle(cmd).await?;
    Ok(Json(MissionResponse::from(&mission)))
}

/// POST /api/missions/:id/complete
pub async fn complete_mission(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CompleteMissionCommand {
        actor,
        mission_id: parse_id(&id, "mission")?,
    };
    let mission = state.complete_mission_handler().handle(cmd).await?;
    Ok(Json(MissionResponse::from(&mission)))
}
