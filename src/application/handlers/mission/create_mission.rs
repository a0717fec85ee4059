//! CreateMissionHandler - registers a mission for a client.

use std::sync::Arc;

use crate::application::NotificationDispatcher;
use crate::domain::foundation::authorization::require_admin;
use crate::domain::foundation::{Actor, MissionId, WorkflowError};
use crate::domain::mission::{Mission, NewMission};
use crate::domain::notification::{messages, NotificationKind};
use crate::ports::{Clock, MissionRepository};

/// Command to create a mission.
#[derive(Debug, Clone)]
pub struct CreateMissionCommand {
    pub actor: Actor,
    pub fields: NewMission,
}

/// Handler for creating missions.
pub struct CreateMissionHandler {
    missions: Arc<dyn MissionRepository>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
}

impl CreateMissionHandler {
    pub fn new(
        missions: Arc<dyn MissionRepository>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            missions,
            dispatcher,
            clock,
        }
    }

    pub async fn handle(&self, cmd: CreateMissionCommand) -> Result<Mission, WorkflowError> {
        // 1. Authorize
        require_admin(&cmd.actor, "mission.create")?;

        // 2. Create and persist
        let mission = Mission::new(MissionId::new(), cmd.fields, self.clock.now())?;
        self.missions.save(&mission).await?;

        // 3. Tell the assignee
        if let Some(assignee_id) = mission.assignee_id() {
            self.dispatcher
                .notify(
                    assignee_id,
                    NotificationKind::MissionAssignment,
                    messages::mission_assigned(mission.title()),
                )
                .await?;
        }

        tracing::info!(mission_id = %mission.id(), "mission created");
        Ok(mission)
    }
}
