//! ValidateReportHandler - `soumis -> valide`.
//!
//! Validation is final: the report can no longer change and its
//! intervention is locked.

use std::sync::Arc;

use super::context::ReportContext;
use crate::application::NotificationDispatcher;
use crate::domain::foundation::{Actor, ReportId, Versioned, WorkflowError};
use crate::domain::notification::{messages, NotificationKind};
use crate::domain::report::InterventionReport;
use crate::ports::{Clock, InterventionRepository, MissionRepository, ReportRepository};

/// Command to validate a submitted report.
#[derive(Debug, Clone)]
pub struct ValidateReportCommand {
    pub actor: Actor,
    pub report_id: ReportId,
    pub comment: String,
}

/// Handler for report validation (administrators only).
pub struct ValidateReportHandler {
    ctx: ReportContext,
    clock: Arc<dyn Clock>,
}

impl ValidateReportHandler {
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

    pub async fn handle(&self, cmd: ValidateReportCommand) -> Result<InterventionReport, WorkflowError> {
        let mut report = self.ctx.load_report(&cmd.report_id).await?;
        let intervention = self.ctx.load_intervention(report.intervention_id()).await?;

        report.validate(&cmd.actor, cmd.comment, self.clock.now())?;
        self.ctx.reports.update(&report).await?;

        self.ctx
            .notify_intervenant(
                &intervention,
                NotificationKind::RapportValide,
                messages::report_validated(intervention.title(), report.validation_comment()),
            )
            .await?;

        tracing::info!(
            report_id = %report.id(),
            intervention_id = %intervention.id(),
            "report validated"
        );
        Ok(report.next_version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{date, TestWorld};
    use crate::domain::foundation::{ReportStatus, Role};
    use crate::domain::intervention::is_locked;
    use crate::domain::report::ReportContent;

    async fn submitted(world: &TestWorld, tech: &Actor) -> InterventionReport {
        let mission = world.mission(None).await;
        let intervention = world
            .intervention(mission.id(), Some(tech.user_id), date(2024, 1, 10))
            .await;
        let mut report = InterventionReport::new(
            ReportId::new(),
            *intervention.id(),
            Some(&tech.user_id),
            tech,
            ReportContent::default(),
            world.now(),
        )
        .unwrap();
        report.submit(tech, Some(&tech.user_id), world.now()).unwrap();
        world.reports.save(&report).await.unwrap();
        report
    }

    fn handler(world: &TestWorld) -> ValidateReportHandler {
        ValidateReportHandler::new(
            world.reports.clone(),
            world.interventions.clone(),
            world.missions.clone(),
            world.dispatcher(),
            world.clock.clone(),
        )
    }

    #[tokio::test]
    async fn validation_notifies_intervenant_and_locks() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let tech = world.user("tech", Role::Employee).await;
        let report = submitted(&world, &tech).await;

        let validated = handler(&world)
            .handle(ValidateReportCommand {
                actor: admin,
                report_id: *report.id(),
                comment: "Clean work".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(validated.status(), ReportStatus::Validated);
        assert_eq!(validated.validated_by(), Some(&admin.user_id));
        assert_eq!(validated.validated_at(), Some(&world.now()));
        assert!(is_locked(Some(&validated)));

        let inbox = world.inbox(&tech.user_id).await;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind(), NotificationKind::RapportValide);
        assert!(inbox[0].message().contains("Clean work"));
    }

    #[tokio::test]
    async fn validated_report_cannot_be_validated_again() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let tech = world.user("tech", Role::Employee).await;
        let report = submitted(&world, &tech).await;
        let cmd = ValidateReportCommand {
            actor: admin,
            report_id: *report.id(),
            comment: String::new(),
        };

        handler(&world).handle(cmd.clone()).await.unwrap();
        let result = handler(&world).handle(cmd).await;

        assert!(matches!(result, Err(WorkflowError::InvalidTransition(_))));
        assert_eq!(world.inbox(&tech.user_id).await.len(), 1);
    }

    #[tokio::test]
    async fn employee_cannot_validate() {
        let world = TestWorld::new();
        let tech = world.user("tech", Role::Employee).await;
        let report = submitted(&world, &tech).await;

        let result = handler(&world)
            .handle(ValidateReportCommand {
                actor: tech,
                report_id: *report.id(),
                comment: String::new(),
            })
            .await;

        assert!(matches!(result, Err(WorkflowError::Unauthorized(_))));
    }
}
