//! HTTP DTOs for intervention endpoints.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::InterventionView;
use crate::domain::attachment::{Attachment, AttachmentKind};
use crate::domain::foundation::{
    InterventionOutcome, InterventionStatus, MissionId, Timestamp, UserId,
};
use crate::domain::intervention::{
    format_work_duration, FieldReport, Intervention, InterventionChanges, NewIntervention,
    Priority,
};

use crate::adapters::http::report::ReportResponse;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInterventionRequest {
    pub mission_id: MissionId,
    pub title: String,
    #[serde(default)]
    pub intervenant_id: Option<UserId>,
    pub scheduled_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub resources: String,
}

impl From<CreateInterventionRequest> for NewIntervention {
    fn from(req: CreateInterventionRequest) -> Self {
        Self {
            mission_id: req.mission_id,
            title: req.title,
            intervenant_id: req.intervenant_id,
            scheduled_date: req.scheduled_date,
            due_date: req.due_date,
            priority: req.priority,
            resources: req.resources,
        }
    }
}

/// Partial update. An explicit `"intervenant_id": null` unassigns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInterventionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub intervenant_id: Option<Option<UserId>>,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub resources: Option<String>,
}

fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateInterventionRequest> for InterventionChanges {
    fn from(req: UpdateInterventionRequest) -> Self {
        Self {
            title: req.title,
            intervenant_id: req.intervenant_id,
            scheduled_date: req.scheduled_date,
            due_date: req.due_date,
            priority: req.priority,
            resources: req.resources,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldReportRequest {
    pub outcome: InterventionOutcome,
    #[serde(default)]
    pub arrival_time: Option<NaiveTime>,
    #[serde(default)]
    pub departure_time: Option<NaiveTime>,
    #[serde(default)]
    pub difficulties: String,
}

impl From<FieldReportRequest> for FieldReport {
    fn from(req: FieldReportRequest) -> Self {
        Self {
            outcome: req.outcome,
            arrival_time: req.arrival_time,
            departure_time: req.departure_time,
            difficulties: req.difficulties,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManageDelayRequest {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub resolved: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddAttachmentRequest {
    pub title: String,
    pub file_ref: String,
    #[serde(default)]
    pub kind: AttachmentKind,
    #[serde(default)]
    pub description: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct DelayFlagsResponse {
    pub late: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<i64>,
    pub reason: String,
    pub resolved: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldReportResponse {
    pub outcome: InterventionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveTime>,
    pub difficulties: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterventionResponse {
    pub id: String,
    pub mission_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub scheduled_date: NaiveDate,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub resources: String,
    pub status: InterventionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    pub field_report: FieldReportResponse,
    pub delay: DelayFlagsResponse,
    pub created_at: String,
    pub version: i64,
}

fn rfc3339(t: &Timestamp) -> String {
    t.as_datetime().to_rfc3339()
}

impl From<&Intervention> for InterventionResponse {
    fn from(i: &Intervention) -> Self {
        let report = i.field_report();
        let delay = i.delay();
        Self {
            id: i.id().to_string(),
            mission_id: i.mission_id().to_string(),
            title: i.title().to_string(),
            intervenant_id: i.intervenant_id().map(ToString::to_string),
            created_by: i.created_by().map(ToString::to_string),
            scheduled_date: i.scheduled_date(),
            due_date: i.due_date(),
            priority: i.priority(),
            resources: i.resources().to_string(),
            status: i.status(),
            started_at: i.started_at().map(rfc3339),
            finished_at: i.finished_at().map(rfc3339),
            field_report: FieldReportResponse {
                outcome: report.outcome,
                arrival_time: report.arrival_time,
                departure_time: report.departure_time,
                difficulties: report.difficulties.clone(),
            },
            delay: DelayFlagsResponse {
                late: delay.late,
                late_since: delay.late_since.as_ref().map(rfc3339),
                duration_secs: delay.duration_secs,
                reason: delay.reason.clone(),
                resolved: delay.resolved,
            },
            created_at: rfc3339(i.created_at()),
            version: i.version(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachmentResponse {
    pub id: String,
    pub intervention_id: String,
    pub title: String,
    pub file_ref: String,
    pub kind: AttachmentKind,
    pub description: String,
    pub added_at: String,
}

impl From<&Attachment> for AttachmentResponse {
    fn from(a: &Attachment) -> Self {
        Self {
            id: a.id().to_string(),
            intervention_id: a.intervention_id().to_string(),
            title: a.title().to_string(),
            file_ref: a.file_ref().to_string(),
            kind: a.kind(),
            description: a.description().to_string(),
            added_at: rfc3339(a.added_at()),
        }
    }
}

/// Detail view: the intervention with its report, attachments and timings.
#[derive(Debug, Clone, Serialize)]
pub struct InterventionDetailResponse {
    #[serde(flatten)]
    pub intervention: InterventionResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportResponse>,
    pub attachments: Vec<AttachmentResponse>,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_delay_secs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_duration: Option<String>,
}

impl From<InterventionView> for InterventionDetailResponse {
    fn from(view: InterventionView) -> Self {
        Self {
            intervention: InterventionResponse::from(&view.intervention),
            report: view.report.as_ref().map(ReportResponse::from),
            attachments: view.attachments.iter().map(AttachmentResponse::from).collect(),
            locked: view.locked,
            current_delay_secs: view.current_delay.map(|d| d.num_seconds()),
            work_duration: view.work_duration.map(format_work_duration),
        }
    }
}
