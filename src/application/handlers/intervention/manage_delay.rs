//! ManageInterventionDelayHandler - edits the delay flags kept on the
//! intervention itself.

use std::sync::Arc;

use crate::domain::foundation::authorization::require_admin_or_owner;
use crate::domain::foundation::{Actor, InterventionId, Versioned, WorkflowError};
use crate::domain::intervention::Intervention;
use crate::ports::{Clock, InterventionRepository};

/// Command to set the delay reason and resolution flag.
#[derive(Debug, Clone)]
pub struct ManageInterventionDelayCommand {
    pub actor: Actor,
    pub intervention_id: InterventionId,
    pub reason: String,
    pub resolved: bool,
}

/// Handler for the intervention's own delay bookkeeping (admin or
/// intervenant). Marking it resolved clears the late flag.
pub struct ManageInterventionDelayHandler {
    interventions: Arc<dyn InterventionRepository>,
    clock: Arc<dyn Clock>,
}

impl ManageInterventionDelayHandler {
    pub fn new(interventions: Arc<dyn InterventionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            interventions,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: ManageInterventionDelayCommand,
    ) -> Result<Intervention, WorkflowError> {
        let mut intervention = self
            .interventions
            .find_by_id(&cmd.intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", cmd.intervention_id))?;

        require_admin_or_owner(&cmd.actor, intervention.intervenant_id(), "intervention.delay")?;

        intervention.manage_delay(cmd.reason, cmd.resolved, self.clock.now());
        self.interventions.update(&intervention).await?;

        Ok(intervention.next_version())
    }
}
