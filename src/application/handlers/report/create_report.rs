//! CreateReportHandler - drafts (and optionally submits) the report of an
//! intervention.

use std::sync::Arc;

use super::context::ReportContext;
use crate::application::NotificationDispatcher;
use crate::domain::foundation::{Actor, InterventionId, ReportId, WorkflowError};
use crate::domain::report::{InterventionReport, ReportContent};
use crate::ports::{Clock, InterventionRepository, MissionRepository, ReportRepository};

/// Command to create an intervention's report.
#[derive(Debug, Clone)]
pub struct CreateReportCommand {
    pub actor: Actor,
    pub intervention_id: InterventionId,
    pub content: ReportContent,
    /// Submit straight away instead of keeping a draft.
    pub submit: bool,
}

/// Handler for report creation. One report per intervention; only the
/// intervenant writes it.
pub struct CreateReportHandler {
    ctx: ReportContext,
    clock: Arc<dyn Clock>,
}

impl CreateReportHandler {
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

    pub async fn handle(&self, cmd: CreateReportCommand) -> Result<InterventionReport, WorkflowError> {
        // 1. Load intervention
        let intervention = self.ctx.load_intervention(&cmd.intervention_id).await?;
        let now = self.clock.now();

        // 2. Draft (checks the actor is the intervenant)
        let mut report = InterventionReport::new(
            ReportId::new(),
            cmd.intervention_id,
            intervention.intervenant_id(),
            &cmd.actor,
            cmd.content,
            now,
        )?;
        if cmd.submit {
            report.submit(&cmd.actor, intervention.intervenant_id(), now)?;
        }

        // 3. Persist (fails if the intervention already has a report)
        self.ctx.reports.save(&report).await?;

        // 4. Announce
        if cmd.submit {
            self.ctx.announce_submission(&intervention).await?;
        }

        Ok(report)
    }
}
