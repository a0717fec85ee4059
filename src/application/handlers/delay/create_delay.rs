//! CreateDelayHandler - manual delay report.

use std::sync::Arc;

use crate::application::NotificationDispatcher;
use crate::domain::delay::{Delay, DelayDetails};
use crate::domain::foundation::{
    Actor, DelayId, InterventionId, Timestamp, Versioned, WorkflowError,
};
use crate::domain::intervention::Intervention;
use crate::domain::notification::{messages, NotificationKind};
use crate::ports::{Clock, DelayRepository, InterventionRepository};

/// Command to report a delay on an intervention.
#[derive(Debug, Clone)]
pub struct CreateDelayCommand {
    pub actor: Actor,
    pub intervention_id: InterventionId,
    pub details: DelayDetails,
    /// When the delay began; defaults to now.
    pub started_at: Option<Timestamp>,
}

/// Handler for manual delay reports.
///
/// The reporter becomes responsible. The intervention is flagged late if it
/// was not already, and every other administrator receives a `retard`
/// notification.
pub struct CreateDelayHandler {
    delays: Arc<dyn DelayRepository>,
    interventions: Arc<dyn InterventionRepository>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
}

impl CreateDelayHandler {
    pub fn new(
        delays: Arc<dyn DelayRepository>,
        interventions: Arc<dyn InterventionRepository>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            delays,
            interventions,
            dispatcher,
            clock,
        }
    }

    pub async fn handle(&self, cmd: CreateDelayCommand) -> Result<Delay, WorkflowError> {
        // 1. Load intervention
        let mut intervention = self
            .interventions
            .find_by_id(&cmd.intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", cmd.intervention_id))?;
        let now = self.clock.now();

        // 2. Build the episode (checks admin or intervenant, reason present)
        let delay = Delay::report(
            DelayId::new(),
            &intervention,
            &cmd.actor,
            cmd.details,
            cmd.started_at.unwrap_or(now),
            now,
        )?;

        // 3. Flag the intervention
        let before = intervention.clone();
        let flagged = intervention.flag_late(now);
        if flagged {
            self.interventions.update(&intervention).await?;
        }

        // 4. Store the episode, undoing the flag if that fails
        if let Err(err) = self.delays.save(&delay).await {
            if flagged {
                self.roll_back(before.next_version()).await;
            }
            return Err(err.into());
        }

        // 5. Audit trail for administrators
        self.dispatcher
            .notify_admins(
                NotificationKind::Retard,
                &messages::delay_reported(intervention.title()),
                Some(&cmd.actor.user_id),
            )
            .await?;

        tracing::info!(
            delay_id = %delay.id(),
            intervention_id = %intervention.id(),
            reported_by = %cmd.actor.user_id,
            "delay reported"
        );
        Ok(delay)
    }

    async fn roll_back(&self, restored: Intervention) {
        if let Err(err) = self.interventions.update(&restored).await {
            tracing::warn!(
                intervention_id = %restored.id(),
                error = %err,
                "could not clear late flag after failed delay report"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{
        date, BrokenDelayWrites, BrokenInterventionWrites, TestWorld,
    };
    use crate::domain::delay::DelayKind;
    use crate::domain::foundation::Role;

    fn handler(world: &TestWorld) -> CreateDelayHandler {
        CreateDelayHandler::new(
            world.delays.clone(),
            world.interventions.clone(),
            world.dispatcher(),
            world.clock.clone(),
        )
    }

    fn details(reason: &str) -> DelayDetails {
        DelayDetails {
            kind: DelayKind::Technical,
            reason: reason.to_string(),
            impact: "Half a day".to_string(),
            corrective_actions: String::new(),
        }
    }

    #[tokio::test]
    async fn intervenant_reports_and_admins_are_told() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let tech = world.user("tech", Role::Employee).await;
        let mission = world.mission(None).await;
        let intervention = world
            .intervention(mission.id(), Some(tech.user_id), date(2024, 1, 10))
            .await;

        let delay = handler(&world)
            .handle(CreateDelayCommand {
                actor: tech,
                intervention_id: *intervention.id(),
                details: details("Part not delivered"),
                started_at: None,
            })
            .await
            .unwrap();

        assert_eq!(delay.responsible_id(), Some(&tech.user_id));
        assert_eq!(delay.started_at(), &world.now());
        let stored = world.stored_intervention(intervention.id()).await;
        assert!(stored.is_late());
        assert_eq!(stored.delay().late_since, Some(world.now()));

        let inbox = world.inbox(&admin.user_id).await;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind(), NotificationKind::Retard);
    }

    #[tokio::test]
    async fn creating_admin_is_not_notified() {
        let world = TestWorld::new();
        let creator = world.user("creator", Role::Administrator).await;
        let other = world.user("other", Role::Administrator).await;
        let mission = world.mission(None).await;
        let intervention = world.intervention(mission.id(), None, date(2024, 1, 10)).await;

        handler(&world)
            .handle(CreateDelayCommand {
                actor: creator,
                intervention_id: *intervention.id(),
                details: details("Client absent"),
                started_at: None,
            })
            .await
            .unwrap();

        assert!(world.inbox(&creator.user_id).await.is_empty());
        assert_eq!(world.inbox(&other.user_id).await.len(), 1);
    }

    #[tokio::test]
    async fn second_delay_keeps_original_late_since() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let mission = world.mission(None).await;
        let intervention = world.intervention(mission.id(), None, date(2024, 1, 10)).await;
        let handler = handler(&world);
        let cmd = CreateDelayCommand {
            actor: admin,
            intervention_id: *intervention.id(),
            details: details("Weather"),
            started_at: None,
        };

        handler.handle(cmd.clone()).await.unwrap();
        world.clock.advance_secs(600);
        handler.handle(cmd).await.unwrap();

        let stored = world.stored_intervention(intervention.id()).await;
        assert_eq!(stored.delay().late_since, Some(world.now()));
        assert_eq!(world.delays.find_by_intervention(intervention.id()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn blank_reason_is_validation_error() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let mission = world.mission(None).await;
        let intervention = world.intervention(mission.id(), None, date(2024, 1, 10)).await;

        let result = handler(&world)
            .handle(CreateDelayCommand {
                actor: admin,
                intervention_id: *intervention.id(),
                details: details(""),
                started_at: None,
            })
            .await;

        assert!(matches!(result, Err(WorkflowError::Validation { .. })));
        assert!(!world.stored_intervention(intervention.id()).await.is_late());
    }

    #[tokio::test]
    async fn unrelated_employee_is_refused() {
        let world = TestWorld::new();
        let outsider = world.user("outsider", Role::Employee).await;
        let mission = world.mission(None).await;
        let intervention = world.intervention(mission.id(), None, date(2024, 1, 10)).await;

        let result = handler(&world)
            .handle(CreateDelayCommand {
                actor: outsider,
                intervention_id: *intervention.id(),
                details: details("Traffic"),
                started_at: None,
            })
            .await;

        assert!(matches!(result, Err(WorkflowError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn failed_intervention_write_stores_no_episode() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let mission = world.mission(None).await;
        let intervention = world.intervention(mission.id(), None, date(2024, 1, 10)).await;

        let broken = CreateDelayHandler::new(
            world.delays.clone(),
            Arc::new(BrokenInterventionWrites(world.interventions.clone())),
            world.dispatcher(),
            world.clock.clone(),
        );
        let result = broken
            .handle(CreateDelayCommand {
                actor: admin,
                intervention_id: *intervention.id(),
                details: details("Road closed"),
                started_at: None,
            })
            .await;

        assert!(matches!(result, Err(WorkflowError::Infrastructure(_))));
        assert!(world.delays.find_all().await.unwrap().is_empty());
        assert!(!world.stored_intervention(intervention.id()).await.is_late());
    }

    #[tokio::test]
    async fn failed_episode_write_clears_late_flag() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let other = world.user("other", Role::Administrator).await;
        let mission = world.mission(None).await;
        let intervention = world.intervention(mission.id(), None, date(2024, 1, 10)).await;

        let broken = CreateDelayHandler::new(
            Arc::new(BrokenDelayWrites(world.delays.clone())),
            world.interventions.clone(),
            world.dispatcher(),
            world.clock.clone(),
        );
        let result = broken
            .handle(CreateDelayCommand {
                actor: admin,
                intervention_id: *intervention.id(),
                details: details("Road closed"),
                started_at: None,
            })
            .await;

        assert!(matches!(result, Err(WorkflowError::Infrastructure(_))));
        let stored = world.stored_intervention(intervention.id()).await;
        assert!(!stored.is_late());
        assert!(stored.delay().late_since.is_none());
        assert!(world.inbox(&other.user_id).await.is_empty());
    }
}
