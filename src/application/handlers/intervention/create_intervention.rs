//! CreateInterventionHandler - schedules an intervention on a mission.

use std::sync::Arc;

use crate::application::NotificationDispatcher;
use crate::domain::foundation::authorization::require_admin_or_owner;
use crate::domain::foundation::{Actor, InterventionId, WorkflowError};
use crate::domain::intervention::{Intervention, NewIntervention};
use crate::domain::notification::{messages, NotificationKind};
use crate::ports::{Clock, InterventionRepository, MissionRepository};

/// Command to create an intervention.
#[derive(Debug, Clone)]
pub struct CreateInterventionCommand {
    pub actor: Actor,
    pub fields: NewIntervention,
}

/// Handler for creating interventions.
///
/// Allowed for administrators and for the assignee of the parent mission.
pub struct CreateInterventionHandler {
    interventions: Arc<dyn InterventionRepository>,
    missions: Arc<dyn MissionRepository>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
}

impl CreateInterventionHandler {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        missions: Arc<dyn MissionRepository>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            interventions,
            missions,
            dispatcher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateInterventionCommand,
    ) -> Result<Intervention, WorkflowError> {
        // 1. Load parent mission
        let mission = self
            .missions
            .find_by_id(&cmd.fields.mission_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Mission", cmd.fields.mission_id))?;

        // 2. Authorize
        require_admin_or_owner(&cmd.actor, mission.assignee_id(), "intervention.create")?;

        // 3. Create and persist
        let intervention = Intervention::new(
            InterventionId::new(),
            cmd.fields,
            cmd.actor.user_id,
            self.clock.now(),
        )?;
        self.interventions.save(&intervention).await?;

        // 4. Tell the intervenant
        if let Some(intervenant_id) = intervention.intervenant_id() {
            self.dispatcher
                .notify(
                    intervenant_id,
                    NotificationKind::InterventionAssignment,
                    messages::intervention_assigned(intervention.title()),
                )
                .await?;
        }

        tracing::info!(
            intervention_id = %intervention.id(),
            mission_id = %mission.id(),
            "intervention created"
        );
        Ok(intervention)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{date, TestWorld};
    use crate::domain::foundation::{MissionId, Role, UserId};
    use crate::domain::intervention::Priority;

    fn handler(world: &TestWorld) -> CreateInterventionHandler {
        CreateInterventionHandler::new(
            world.interventions.clone(),
            world.missions.clone(),
            world.dispatcher(),
            world.clock.clone(),
        )
    }

    fn fields(mission_id: MissionId, intervenant: Option<UserId>) -> NewIntervention {
        NewIntervention {
            mission_id,
            title: "Inspect roof".to_string(),
            intervenant_id: intervenant,
            scheduled_date: date(2024, 1, 8),
            due_date: date(2024, 1, 10),
            priority: Priority::Urgent,
            resources: "ladder".to_string(),
        }
    }

    #[tokio::test]
    async fn admin_creates_and_intervenant_is_notified() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let tech = world.user("tech", Role::Employee).await;
        let mission = world.mission(None).await;

        let intervention = handler(&world)
            .handle(CreateInterventionCommand {
                actor: admin,
                fields: fields(*mission.id(), Some(tech.user_id)),
            })
            .await
            .unwrap();

        assert_eq!(intervention.created_by(), Some(&admin.user_id));
        let inbox = world.inbox(&tech.user_id).await;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind(), NotificationKind::InterventionAssignment);
        assert!(inbox[0].message().contains("Inspect roof"));
    }

    #[tokio::test]
    async fn mission_assignee_may_create() {
        let world = TestWorld::new();
        let lead = world.user("lead", Role::Employee).await;
        let mission = world.mission(Some(lead.user_id)).await;

        let result = handler(&world)
            .handle(CreateInterventionCommand {
                actor: lead,
                fields: fields(*mission.id(), None),
            })
            .await;

        assert!(result.is_ok());
        assert!(world.notifications.all().await.is_empty());
    }

    #[tokio::test]
    async fn other_employee_is_refused() {
        let world = TestWorld::new();
        let outsider = world.user("outsider", Role::Freelancer).await;
        let mission = world.mission(None).await;

        let result = handler(&world)
            .handle(CreateInterventionCommand {
                actor: outsider,
                fields: fields(*mission.id(), None),
            })
            .await;

        assert!(matches!(result, Err(WorkflowError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn unknown_mission_is_not_found() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;

        let result = handler(&world)
            .handle(CreateInterventionCommand {
                actor: admin,
                fields: fields(MissionId::new(), None),
            })
            .await;

        assert!(matches!(result, Err(WorkflowError::NotFound { resource: "Mission", .. })));
    }
}
