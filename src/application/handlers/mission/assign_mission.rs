//! AssignMissionHandler - changes a mission's assignee.

use std::sync::Arc;

use crate::application::NotificationDispatcher;
use crate::domain::foundation::authorization::require_admin;
use crate::domain::foundation::{Actor, MissionId, UserId, Versioned, WorkflowError};
use crate::domain::mission::Mission;
use crate::domain::notification::{messages, NotificationKind};
use crate::ports::{MissionRepository, UserRepository};

/// Command to (re)assign a mission. `None` unassigns.
#[derive(Debug, Clone)]
pub struct AssignMissionCommand {
    pub actor: Actor,
    pub mission_id: MissionId,
    pub assignee_id: Option<UserId>,
}

/// Handler for mission assignment. The new assignee is notified; assigning
/// the current assignee again changes nothing.
pub struct AssignMissionHandler {
    missions: Arc<dyn MissionRepository>,
    users: Arc<dyn UserRepository>,
    dispatcher: NotificationDispatcher,
}

impl AssignMissionHandler {
    pub fn new(
        missions: Arc<dyn MissionRepository>,
        users: Arc<dyn UserRepository>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            missions,
            users,
            dispatcher,
        }
    }

    pub async fn handle(&self, cmd: AssignMissionCommand) -> Result<Mission, WorkflowError> {
        require_admin(&cmd.actor, "mission.assign")?;

        let mut mission = self
            .missions
            .find_by_id(&cmd.mission_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Mission", cmd.mission_id))?;

        if let Some(assignee_id) = &cmd.assignee_id {
            if self.users.find_by_id(assignee_id).await?.is_none() {
                return Err(WorkflowError::not_found("User", assignee_id));
            }
        }

        if !mission.assign(cmd.assignee_id) {
            return Ok(mission);
        }
        self.missions.update(&mission).await?;

        if let Some(assignee_id) = mission.assignee_id() {
            self.dispatcher
                .notify(
                    assignee_id,
                    NotificationKind::MissionAssignment,
                    messages::mission_assigned(mission.title()),
                )
                .await?;
        }
        Ok(mission.next_version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::TestWorld;
    use crate::domain::foundation::Role;

    fn handler(world: &TestWorld) -> AssignMissionHandler {
        AssignMissionHandler::new(world.missions.clone(), world.users.clone(), world.dispatcher())
    }

    #[tokio::test]
    async fn new_assignee_is_notified_once() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let lead = world.user("lead", Role::Employee).await;
        let mission = world.mission(None).await;
        let cmd = AssignMissionCommand {
            actor: admin,
            mission_id: *mission.id(),
            assignee_id: Some(lead.user_id),
        };

        let assigned = handler(&world).handle(cmd.clone()).await.unwrap();
        handler(&world).handle(cmd).await.unwrap();

        assert_eq!(assigned.assignee_id(), Some(&lead.user_id));
        assert_eq!(world.inbox(&lead.user_id).await.len(), 1);
    }

    #[tokio::test]
    async fn unknown_assignee_is_not_found() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let mission = world.mission(None).await;

        let result = handler(&world)
            .handle(AssignMissionCommand {
                actor: admin,
                mission_id: *mission.id(),
                assignee_id: Some(UserId::new()),
            })
            .await;

        assert!(matches!(result, Err(WorkflowError::NotFound { resource: "User", .. })));
    }
}
