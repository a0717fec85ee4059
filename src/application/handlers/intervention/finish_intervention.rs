//! FinishInterventionHandler - `en_cours -> terminee`.

use std::sync::Arc;

use crate::domain::foundation::{Actor, InterventionId, Versioned, WorkflowError};
use crate::domain::intervention::Intervention;
use crate::ports::{Clock, InterventionRepository};

/// Command to finish an intervention.
#[derive(Debug, Clone)]
pub struct FinishInterventionCommand {
    pub actor: Actor,
    pub intervention_id: InterventionId,
}

/// Handler for finishing interventions.
pub struct FinishInterventionHandler {
    interventions: Arc<dyn InterventionRepository>,
    clock: Arc<dyn Clock>,
}

impl FinishInterventionHandler {
    pub fn new(interventions: Arc<dyn InterventionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            interventions,
            clock,
        }
    }

    pub async fn handle(&self, cmd: FinishInterventionCommand) -> Result<Intervention, WorkflowError> {
        let mut intervention = self
            .interventions
            .find_by_id(&cmd.intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", cmd.intervention_id))?;

        intervention.finish(&cmd.actor, self.clock.now())?;
        self.interventions.update(&intervention).await?;

        Ok(intervention.next_version())
    }
}
