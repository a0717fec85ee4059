//! CheckInterventionDelayHandler - detection for a single intervention.

use chrono::NaiveDate;
use std::sync::Arc;

use super::DelayFlagger;
use crate::domain::foundation::{InterventionId, WorkflowError};
use crate::ports::InterventionRepository;

/// Runs the detection step on one intervention, e.g. when it is viewed.
#[derive(Clone)]
pub struct CheckInterventionDelayHandler {
    interventions: Arc<dyn InterventionRepository>,
    flagger: DelayFlagger,
}

impl CheckInterventionDelayHandler {
    pub fn new(interventions: Arc<dyn InterventionRepository>, flagger: DelayFlagger) -> Self {
        Self {
            interventions,
            flagger,
        }
    }

    /// Returns true if this call flagged the intervention.
    ///
    /// Same side effects and idempotency as a detection pass.
    pub async fn check_and_flag_if_late(
        &self,
        intervention_id: &InterventionId,
        today: NaiveDate,
    ) -> Result<bool, WorkflowError> {
        let intervention = self
            .interventions
            .find_by_id(intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", intervention_id))?;

        Ok(self.flagger.flag(intervention, today).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{date, TestWorld};
    use crate::domain::foundation::Role;
    use crate::ports::DelayRepository;

    #[tokio::test]
    async fn flags_overdue_intervention_once() {
        let world = TestWorld::new();
        let tech = world.user("tech", Role::Employee).await;
        let mission = world.mission(None).await;
        let intervention = world
            .intervention(mission.id(), Some(tech.user_id), date(2024, 1, 1))
            .await;
        let handler = CheckInterventionDelayHandler::new(world.interventions.clone(), world.flagger());

        assert!(handler
            .check_and_flag_if_late(intervention.id(), date(2024, 1, 5))
            .await
            .unwrap());
        assert!(!handler
            .check_and_flag_if_late(intervention.id(), date(2024, 1, 5))
            .await
            .unwrap());
        assert_eq!(world.delays.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn leaves_on_time_intervention_alone() {
        let world = TestWorld::new();
        let mission = world.mission(None).await;
        let intervention = world.intervention(mission.id(), None, date(2024, 1, 10)).await;
        let handler = CheckInterventionDelayHandler::new(world.interventions.clone(), world.flagger());

        let flagged = handler
            .check_and_flag_if_late(intervention.id(), date(2024, 1, 5))
            .await
            .unwrap();

        assert!(!flagged);
        assert!(world.notifications.all().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_intervention_is_not_found() {
        let world = TestWorld::new();
        let handler = CheckInterventionDelayHandler::new(world.interventions.clone(), world.flagger());

        let result = handler
            .check_and_flag_if_late(&InterventionId::new(), date(2024, 1, 5))
            .await;

        assert!(matches!(result, Err(WorkflowError::NotFound { resource: "Intervention", .. })));
    }
}
