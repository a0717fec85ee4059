//! HTTP DTOs for report endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ReportStatus;
use crate::domain::report::{InterventionReport, ReportContent};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportContentRequest {
    #[serde(default)]
    pub works_done: String,
    #[serde(default)]
    pub final_result: String,
    #[serde(default)]
    pub resources_used: String,
    #[serde(default)]
    pub improvements: String,
}

impl From<ReportContentRequest> for ReportContent {
    fn from(req: ReportContentRequest) -> Self {
        Self {
            works_done: req.works_done,
            final_result: req.final_result,
            resources_used: req.resources_used,
            improvements: req.improvements,
        }
    }
}

/// Create or edit a report. `submit: true` submits it in the same call.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteReportRequest {
    #[serde(flatten)]
    pub content: ReportContentRequest,
    #[serde(default)]
    pub submit: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateReportRequest {
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RejectReportRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub id: String,
    pub intervention_id: String,
    pub works_done: String,
    pub final_result: String,
    pub resources_used: String,
    pub improvements: String,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rejection_reason: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub validation_comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub version: i64,
}

impl From<&InterventionReport> for ReportResponse {
    fn from(r: &InterventionReport) -> Self {
        let content = r.content();
        Self {
            id: r.id().to_string(),
            intervention_id: r.intervention_id().to_string(),
            works_done: content.works_done.clone(),
            final_result: content.final_result.clone(),
            resources_used: content.resources_used.clone(),
            improvements: content.improvements.clone(),
            status: r.status(),
            rejection_reason: r.rejection_reason().to_string(),
            validation_comment: r.validation_comment().to_string(),
            validated_by: r.validated_by().map(ToString::to_string),
            rejected_by: r.rejected_by().map(ToString::to_string),
            validated_at: r.validated_at().map(|t| t.as_datetime().to_rfc3339()),
            created_at: r.created_at().as_datetime().to_rfc3339(),
            updated_at: r.updated_at().as_datetime().to_rfc3339(),
            version: r.version(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn write_request_flattens_content() {
        let req: WriteReportRequest = serde_json::from_value(json!({
            "works_done": "Replaced the valve",
            "submit": true
        }))
        .unwrap();
        assert!(req.submit);
        assert_eq!(req.content.works_done, "Replaced the valve");
        assert!(req.content.improvements.is_empty());
    }

    #[test]
    fn submit_defaults_to_false() {
        let req: WriteReportRequest = serde_json::from_value(json!({})).unwrap();
        assert!(!req.submit);
    }
}
