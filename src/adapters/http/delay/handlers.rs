//! HTTP handlers for delay endpoints.

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
    CreateDelayCommand, DelayDashboardQuery, GetDelayQuery, ListDelaysQuery, ResolveDelayCommand,
    UpdateDelayCommand,
};
use crate::domain::foundation::{DelayId, Timestamp};

use super::dto::{CreateDelayRequest, DelayDashboardResponse, DelayDetailsRequest, DelayResponse};

/// POST /api/interventions/:id/delays
pub async fn create_delay(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<CreateDelayRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateDelayCommand {
        actor,
        intervention_id: parse_id(&id, "intervention")?,
        details: req.details.into(),
        started_at: req.started_at.map(Timestamp::from_datetime),
    };
    let delay = state.create_delay_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(DelayResponse::from(&delay))))
}

/// GET /api/delays
pub async fn list_delays(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<impl IntoResponse, ApiError> {
    let views = state
        .list_delays_handler()
        .handle(ListDelaysQuery { actor })
        .await?;
    let body: Vec<DelayResponse> = views.into_iter().map(DelayResponse::from).collect();
    Ok(Json(body))
}

/// GET /api/delays/dashboard
pub async fn delay_dashboard(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = state
        .delay_dashboard_handler()
        .handle(DelayDashboardQuery { actor })
        .await?;
    Ok(Json(DelayDashboardResponse::from(dashboard)))
}

/// GET /api/delays/:id
pub async fn get_delay(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetDelayQuery {
        actor,
        delay_id: parse_id::<DelayId>(&id, "delay")?,
    };
    let view = state.get_delay_handler().handle(query).await?;
    Ok(Json(DelayResponse::from(view)))
}

/// PATCH /api/delays/:id
pub async fn update_delay(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<DelayDetailsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateDelayCommand {
        actor,
        delay_id: parse_id(&id, "delay")?,
        details: req.into(),
    };
    let delay = state.update_delay_handler().handle(cmd).await?;
    Ok(Json(DelayResponse::from(&delay)))
}

/// POST /api/delays/:id/resolve
pub async fn resolve_delay(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ResolveDelayCommand {
        actor,
        delay_id: parse_id(&id, "delay")?,
    };
    let delay = state.resolve_delay_handler().handle(cmd).await?;
    Ok(Json(DelayResponse::from(&delay)))
}
