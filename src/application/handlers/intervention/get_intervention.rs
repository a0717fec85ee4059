//! GetInterventionHandler - intervention detail view.
//!
//! Viewing an intervention runs the per-record delay check first, so an
//! overdue intervention is flagged the moment someone looks at it.

use chrono::Duration;
use std::sync::Arc;

use crate::application::handlers::detection::CheckInterventionDelayHandler;
use crate::domain::attachment::Attachment;
use crate::domain::foundation::authorization::require_admin_or_any_owner;
use crate::domain::foundation::{Actor, InterventionId, WorkflowError};
use crate::domain::intervention::{is_locked, Intervention};
use crate::domain::report::InterventionReport;
use crate::ports::{AttachmentRepository, Clock, InterventionRepository, ReportRepository};

/// Query for one intervention.
#[derive(Debug, Clone)]
pub struct GetInterventionQuery {
    pub actor: Actor,
    pub intervention_id: InterventionId,
}

/// Everything the detail page shows.
#[derive(Debug, Clone)]
pub struct InterventionView {
    pub intervention: Intervention,
    pub report: Option<InterventionReport>,
    pub attachments: Vec<Attachment>,
    /// True once the report is validated.
    pub locked: bool,
    pub current_delay: Option<Duration>,
    pub work_duration: Option<Duration>,
}

/// Handler for the intervention detail query.
///
/// Visible to administrators, the intervenant and the creator.
pub struct GetInterventionHandler {
    interventions: Arc<dyn InterventionRepository>,
    reports: Arc<dyn ReportRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    delay_check: CheckInterventionDelayHandler,
    clock: Arc<dyn Clock>,
}

impl GetInterventionHandler {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        reports: Arc<dyn ReportRepository>,
        attachments: Arc<dyn AttachmentRepository>,
        delay_check: CheckInterventionDelayHandler,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            interventions,
            reports,
            attachments,
            delay_check,
            clock,
        }
    }

    pub async fn handle(&self, query: GetInterventionQuery) -> Result<InterventionView, WorkflowError> {
        let mut intervention = self.load(&query.intervention_id).await?;
        require_admin_or_any_owner(
            &query.actor,
            &[intervention.intervenant_id(), intervention.created_by()],
            "intervention.view",
        )?;

        // A failed check must not hide the record; the next view retries.
        match self
            .delay_check
            .check_and_flag_if_late(&query.intervention_id, self.clock.today())
            .await
        {
            Ok(true) => intervention = self.load(&query.intervention_id).await?,
            Ok(false) => {}
            Err(err) => tracing::warn!(
                intervention_id = %query.intervention_id,
                error = %err,
                "delay check on view failed"
            ),
        }

        let report = self.reports.find_by_intervention(&query.intervention_id).await?;
        let attachments = self
            .attachments
            .find_by_intervention(&query.intervention_id)
            .await?;
        let now = self.clock.now();

        Ok(InterventionView {
            locked: is_locked(report.as_ref()),
            current_delay: intervention.current_delay(now),
            work_duration: intervention.work_duration(),
            intervention,
            report,
            attachments,
        })
    }

    async fn load(&self, id: &InterventionId) -> Result<Intervention, WorkflowError> {
        self.interventions
            .find_by_id(id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", id))
    }
}
