//! UpdateInterventionHandler - edits an intervention's planning fields.

use std::sync::Arc;

use crate::application::NotificationDispatcher;
use crate::domain::foundation::authorization::require_admin_or_owner;
use crate::domain::foundation::{Actor, InterventionId, Versioned, WorkflowError};
use crate::domain::intervention::{ensure_unlocked, Intervention, InterventionChanges};
use crate::domain::notification::{messages, NotificationKind};
use crate::ports::{InterventionRepository, ReportRepository};

/// Command to edit an intervention.
#[derive(Debug, Clone)]
pub struct UpdateInterventionCommand {
    pub actor: Actor,
    pub intervention_id: InterventionId,
    pub changes: InterventionChanges,
}

/// Handler for editing interventions. Admin or creator; refused once the
/// report is validated.
pub struct UpdateInterventionHandler {
    interventions: Arc<dyn InterventionRepository>,
    reports: Arc<dyn ReportRepository>,
    dispatcher: NotificationDispatcher,
}

impl UpdateInterventionHandler {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        reports: Arc<dyn ReportRepository>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            interventions,
            reports,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateInterventionCommand,
    ) -> Result<Intervention, WorkflowError> {
        let mut intervention = self
            .interventions
            .find_by_id(&cmd.intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", cmd.intervention_id))?;

        require_admin_or_owner(&cmd.actor, intervention.created_by(), "intervention.edit")?;
        let report = self.reports.find_by_intervention(&cmd.intervention_id).await?;
        ensure_unlocked(report.as_ref())?;

        let reassigned = intervention.update_details(cmd.changes)?;
        self.interventions.update(&intervention).await?;

        if reassigned {
            if let Some(intervenant_id) = intervention.intervenant_id() {
                self.dispatcher
                    .notify(
                        intervenant_id,
                        NotificationKind::InterventionAssignment,
                        messages::intervention_assigned(intervention.title()),
                    )
                    .await?;
            }
        }

        Ok(intervention.next_version())
    }
}
