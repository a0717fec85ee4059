//! RejectReportHandler - `soumis -> rejete`.

use std::sync::Arc;

use super::context::ReportContext;
use crate::application::NotificationDispatcher;
use crate::domain::foundation::{Actor, ReportId, Versioned, WorkflowError};
use crate::domain::notification::{messages, NotificationKind};
use crate::domain::report::InterventionReport;
use crate::ports::{Clock, InterventionRepository, MissionRepository, ReportRepository};

/// Command to reject a submitted report. The reason is mandatory.
#[derive(Debug, Clone)]
pub struct RejectReportCommand {
    pub actor: Actor,
    pub report_id: ReportId,
    pub reason: String,
}

/// Handler for report rejection (administrators only).
pub struct RejectReportHandler {
    ctx: ReportContext,
    clock: Arc<dyn Clock>,
}

impl RejectReportHandler {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        interventions: Arc<dyn InterventionRepository>,
        missions: Arc<dyn MissionRepository>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ctx: ReportContext {
                reports,
                interventions,
                missions,
                dispatcher,
            },
            clock,
        }
    }

    pub async fn handle(&self, cmd: RejectReportCommand) -> Result<InterventionReport, WorkflowError> {
        let mut report = self.ctx.load_report(&cmd.report_id).await?;
        let intervention = self.ctx.load_intervention(report.intervention_id()).await?;

        report.reject(&cmd.actor, cmd.reason, self.clock.now())?;
        self.ctx.reports.update(&report).await?;

        self.ctx
            .notify_intervenant(
                &intervention,
                NotificationKind::RapportRejete,
                messages::report_rejected(intervention.title(), report.rejection_reason()),
            )
            .await?;

        Ok(report.next_version())
    }
}
