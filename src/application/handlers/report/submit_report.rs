//! SubmitReportHandler - `brouillon | rejete -> soumis`.

use std::sync::Arc;

use super::context::ReportContext;
use crate::application::NotificationDispatcher;
use crate::domain::foundation::{Actor, ReportId, Versioned, WorkflowError};
use crate::domain::report::InterventionReport;
use crate::ports::{Clock, InterventionRepository, MissionRepository, ReportRepository};

/// Command to submit a report for review.
#[derive(Debug, Clone)]
pub struct SubmitReportCommand {
    pub actor: Actor,
    pub report_id: ReportId,
}

/// Handler for report submission. Every administrator is notified.
pub struct SubmitReportHandler {
    ctx: ReportContext,
    clock: Arc<dyn Clock>,
}

impl SubmitReportHandler {
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

    pub async fn handle(&self, cmd: SubmitReportCommand) -> Result<InterventionReport, WorkflowError> {
        // 1. Load report and its intervention
        let mut report = self.ctx.load_report(&cmd.report_id).await?;
        let intervention = self.ctx.load_intervention(report.intervention_id()).await?;

        // 2. Transition (checks the actor is the intervenant)
        report.submit(&cmd.actor, intervention.intervenant_id(), self.clock.now())?;

        // 3. Persist
        self.ctx.reports.update(&report).await?;

        // 4. Fan out to administrators
        self.ctx.announce_submission(&intervention).await?;

        Ok(report.next_version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{date, TestWorld};
    use crate::domain::foundation::{ReportStatus, Role};
    use crate::domain::report::ReportContent;

    async fn draft(world: &TestWorld, tech: &Actor) -> InterventionReport {
        let mission = world.mission(None).await;
        let intervention = world
            .intervention(mission.id(), Some(tech.user_id), date(2024, 1, 10))
            .await;
        let report = InterventionReport::new(
            ReportId::new(),
            *intervention.id(),
            Some(&tech.user_id),
            tech,
            ReportContent::default(),
            world.now(),
        )
        .unwrap();
        world.reports.save(&report).await.unwrap();
        report
    }

    fn handler(world: &TestWorld) -> SubmitReportHandler {
        SubmitReportHandler::new(
            world.reports.clone(),
            world.interventions.clone(),
            world.missions.clone(),
            world.dispatcher(),
            world.clock.clone(),
        )
    }

    #[tokio::test]
    async fn submission_fans_out_to_every_admin() {
        let world = TestWorld::new();
        let a = world.user("a", Role::Administrator).await;
        let b = world.user("b", Role::Administrator).await;
        let tech = world.user("tech", Role::Employee).await;
        let report = draft(&world, &tech).await;

        let submitted = handler(&world)
            .handle(SubmitReportCommand {
                actor: tech,
                report_id: *report.id(),
            })
            .await
            .unwrap();

        assert_eq!(submitted.status(), ReportStatus::Submitted);
        assert_eq!(world.inbox(&a.user_id).await.len(), 1);
        assert_eq!(world.inbox(&b.user_id).await.len(), 1);
        assert!(world.inbox(&tech.user_id).await.is_empty());
    }

    #[tokio::test]
    async fn submitting_twice_is_invalid() {
        let world = TestWorld::new();
        let tech = world.user("tech", Role::Employee).await;
        let report = draft(&world, &tech).await;
        let cmd = SubmitReportCommand {
            actor: tech,
            report_id: *report.id(),
        };

        handler(&world).handle(cmd.clone()).await.unwrap();
        let result = handler(&world).handle(cmd).await;

        assert!(matches!(result, Err(WorkflowError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn unknown_report_is_not_found() {
        let world = TestWorld::new();
        let tech = world.user("tech", Role::Employee).await;

        let result = handler(&world)
            .handle(SubmitReportCommand {
                actor: tech,
                report_id: ReportId::new(),
            })
            .await;

        assert!(matches!(result, Err(WorkflowError::NotFound { resource: "Report", .. })));
    }
}
