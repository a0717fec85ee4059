//! HTTP DTOs for delay endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::{DelayDashboard, DelayView};
use crate::domain::delay::{Delay, DelayDetails, DelayKind};

#[derive(Debug, Clone, Deserialize)]
pub struct DelayDetailsRequest {
    pub kind: DelayKind,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub corrective_actions: String,
}

impl From<DelayDetailsRequest> for DelayDetails {
    fn from(req: DelayDetailsRequest) -> Self {
        Self {
            kind: req.kind,
            reason: req.reason,
            impact: req.impact,
            corrective_actions: req.corrective_actions,
        }
    }
}

/// Manual delay report. `started_at` defaults to now.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDelayRequest {
    #[serde(flatten)]
    pub details: DelayDetailsRequest,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DelayResponse {
    pub id: String,
    pub intervention_id: String,
    pub kind: DelayKind,
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    /// Fixed once resolved; otherwise elapsed time when the response was built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<i64>,
    pub reason: String,
    pub impact: String,
    pub corrective_actions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<String>,
    pub resolved: bool,
    pub created_at: String,
    pub version: i64,
}

impl DelayResponse {
    fn build(delay: &Delay, duration_secs: Option<i64>) -> Self {
        Self {
            id: delay.id().to_string(),
            intervention_id: delay.intervention_id().to_string(),
            kind: delay.kind(),
            started_at: delay.started_at().as_datetime().to_rfc3339(),
            ended_at: delay.ended_at().map(|t| t.as_datetime().to_rfc3339()),
            duration_secs,
            reason: delay.reason().to_string(),
            impact: delay.impact().to_string(),
            corrective_actions: delay.corrective_actions().to_string(),
            responsible_id: delay.responsible_id().map(ToString::to_string),
            resolved: delay.is_resolved(),
            created_at: delay.created_at().as_datetime().to_rfc3339(),
            version: delay.version(),
        }
    }
}

impl From<&Delay> for DelayResponse {
    fn from(delay: &Delay) -> Self {
        Self::build(delay, delay.duration_secs())
    }
}

impl From<DelayView> for DelayResponse {
    fn from(view: DelayView) -> Self {
        Self::build(&view.delay, view.duration.map(|d| d.num_seconds()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DelayDashboardResponse {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
    pub late_interventions: usize,
    pub recent: Vec<DelayResponse>,
}

impl From<DelayDashboard> for DelayDashboardResponse {
    fn from(d: DelayDashboard) -> Self {
        Self {
            total: d.total,
            open: d.open,
            resolved: d.resolved,
            late_interventions: d.late_interventions,
            recent: d.recent.iter().map(DelayResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_reads_kind_and_optional_start() {
        let req: CreateDelayRequest = serde_json::from_value(json!({
            "kind": "technique",
            "reason": "Spare part missing"
        }))
        .unwrap();
        assert_eq!(req.details.kind, DelayKind::Technical);
        assert!(req.started_at.is_none());
    }
}
