//! UpdateReportHandler - edits a draft or rejected report.

use std::sync::Arc;

use super::context::ReportContext;
use crate::application::NotificationDispatcher;
use crate::domain::foundation::{Actor, ReportId, Versioned, WorkflowError};
use crate::domain::report::{InterventionReport, ReportContent};
use crate::ports::{Clock, InterventionRepository, MissionRepository, ReportRepository};

/// Command to replace a report's content.
#[derive(Debug, Clone)]
pub struct UpdateReportCommand {
    pub actor: Actor,
    pub report_id: ReportId,
    pub content: ReportContent,
    /// Submit after saving the new content.
    pub submit: bool,
}

pub struct UpdateReportHandler {
    ctx: ReportContext,
    clock: Arc<dyn Clock>,
}

impl UpdateReportHandler {
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

    pub async fn handle(&self, cmd: UpdateReportCommand) -> Result<InterventionReport, WorkflowError> {
        let mut report = self.ctx.load_report(&cmd.report_id).await?;
        let intervention = self.ctx.load_intervention(report.intervention_id()).await?;
        let now = self.clock.now();

        report.update_content(&cmd.actor, intervention.intervenant_id(), cmd.content, now)?;
        if cmd.submit {
            report.submit(&cmd.actor, intervention.intervenant_id(), now)?;
        }
        self.ctx.reports.update(&report).await?;

        if cmd.submit {
            self.ctx.announce_submission(&intervention).await?;
        }
        Ok(report.next_version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{date, TestWorld};
    use crate::domain::foundation::{ReportStatus, Role};

    #[tokio::test]
    async fn intervenant_edits_draft() {
        let world = TestWorld::new();
        let tech = world.user("tech", Role::Employee).await;
        let mission = world.mission(None).await;
        let intervention = world
            .intervention(mission.id(), Some(tech.user_id), date(2024, 1, 10))
            .await;
        let draft = InterventionReport::new(
            ReportId::new(),
            *intervention.id(),
            Some(&tech.user_id),
            &tech,
            ReportContent::default(),
            world.now(),
        )
        .unwrap();
        world.reports.save(&draft).await.unwrap();

        let handler = UpdateReportHandler::new(
            world.reports.clone(),
            world.interventions.clone(),
            world.missions.clone(),
            world.dispatcher(),
            world.clock.clone(),
        );
        let updated = handler
            .handle(UpdateReportCommand {
                actor: tech,
                report_id: *draft.id(),
                content: ReportContent {
                    works_done: "Checked wiring".to_string(),
                    ..Default::default()
                },
                submit: false,
            })
            .await
            .unwrap();

        assert_eq!(updated.status(), ReportStatus::Draft);
        assert_eq!(updated.content().works_done, "Checked wiring");
        assert_eq!(updated.version(), 1);
    }
}
