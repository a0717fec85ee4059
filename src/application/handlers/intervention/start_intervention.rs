//! StartInterventionHandler - `en_attente -> en_cours`.

use std::sync::Arc;

use crate::domain::foundation::{Actor, InterventionId, Versioned, WorkflowError};
use crate::domain::intervention::Intervention;
use crate::ports::{Clock, InterventionRepository, MissionRepository};

/// Command to start an intervention.
#[derive(Debug, Clone)]
pub struct StartInterventionCommand {
    pub actor: Actor,
    pub intervention_id: InterventionId,
}

/// Handler for starting interventions.
///
/// Starting the first intervention of a pending mission puts the mission
/// in progress.
pub struct StartInterventionHandler {
    interventions: Arc<dyn InterventionRepository>,
    missions: Arc<dyn MissionRepository>,
    clock: Arc<dyn Clock>,
}

impl StartInterventionHandler {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        missions: Arc<dyn MissionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            interventions,
            missions,
            clock,
        }
    }

    pub async fn handle(&self, cmd: StartInterventionCommand) -> Result<Intervention, WorkflowError> {
        // 1. Load
        let mut intervention = self
            .interventions
            .find_by_id(&cmd.intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", cmd.intervention_id))?;

        // 2. Transition (checks the actor is the intervenant)
        intervention.start(&cmd.actor, self.clock.now())?;

        // 3. Persist
        self.interventions.update(&intervention).await?;

        // 4. Promote the parent mission
        if let Some(mut mission) = self.missions.find_by_id(intervention.mission_id()).await? {
            if mission.promote_on_intervention_start() {
                self.missions.update(&mission).await?;
                tracing::info!(mission_id = %mission.id(), "mission in progress");
            }
        }

        Ok(intervention.next_version())
    }
}
