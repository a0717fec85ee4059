//! CompleteMissionHandler - `en_cours -> terminee`.
//!
//! Field reports can only be written on interventions of a completed
//! mission.

use std::sync::Arc;

use crate::domain::foundation::authorization::require_admin;
use crate::domain::foundation::{Actor, MissionId, Versioned, WorkflowError};
use crate::domain::mission::Mission;
use crate::ports::MissionRepository;

#[derive(Debug, Clone)]
pub struct CompleteMissionCommand {
    pub actor: Actor,
    pub mission_id: MissionId,
}

pub struct CompleteMissionHandler {
    missions: Arc<dyn MissionRepository>,
}

impl CompleteMissionHandler {
    pub fn new(missions: Arc<dyn MissionRepository>) -> Self {
        Self { missions }
    }

    pub async fn handle(&self, cmd: CompleteMissionCommand) -> Result<Mission, WorkflowError> {
        require_admin(&cmd.actor, "mission.complete")?;

        let mut mission = self
            .missions
            .find_by_id(&cmd.mission_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Mission", cmd.mission_id))?;

        mission.complete()?;
        self.missions.update(&mission).await?;

        tracing::info!(mission_id = %mission.id(), "mission completed");
        Ok(mission.next_version())
    }
}
