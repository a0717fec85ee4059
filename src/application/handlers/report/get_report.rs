//! GetReportHandler - report of an intervention.

use std::sync::Arc;

use crate::domain::foundation::authorization::require_admin_or_owner;
use crate::domain::foundation::{Actor, InterventionId, WorkflowError};
use crate::domain::report::InterventionReport;
use crate::ports::{InterventionRepository, ReportRepository};

#[derive(Debug, Clone)]
pub struct GetReportQuery {
    pub actor: Actor,
    pub intervention_id: InterventionId,
}

/// Administrators and the intervenant may read a report.
pub struct GetReportHandler {
    reports: Arc<dyn ReportRepository>,
    interventions: Arc<dyn InterventionRepository>,
}

impl GetReportHandler {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        interventions: Arc<dyn InterventionRepository>,
    ) -> Self {
        Self {
            reports,
            interventions,
        }
    }

    pub async fn handle(&self, query: GetReportQuery) -> Result<InterventionReport, WorkflowError> {
        let intervention = self
            .interventions
            .find_by_id(&query.intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", query.intervention_id))?;
        require_admin_or_owner(&query.actor, intervention.intervenant_id(), "report.view")?;

        self.reports
            .find_by_intervention(&query.intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Report", query.intervention_id))
    }
}
