//! SubmitFieldReportHandler - the intervenant's field report.

use std::sync::Arc;

use crate::application::NotificationDispatcher;
use crate::domain::foundation::authorization::require_ownership;
use crate::domain::foundation::{Actor, InterventionId, Versioned, WorkflowError};
use crate::domain::intervention::{FieldReport, Intervention};
use crate::domain::notification::{messages, NotificationKind};
use crate::ports::{InterventionRepository, MissionRepository};

/// Command to record the field report of an intervention.
#[derive(Debug, Clone)]
pub struct SubmitFieldReportCommand {
    pub actor: Actor,
    pub intervention_id: InterventionId,
    pub report: FieldReport,
}

/// Handler for field reports.
///
/// Only the intervenant may write it, and only once the parent mission is
/// completed. The mission assignee is notified, or the first administrator
/// when the mission has no assignee.
pub struct SubmitFieldReportHandler {
    interventions: Arc<dyn InterventionRepository>,
    missions: Arc<dyn MissionRepository>,
    dispatcher: NotificationDispatcher,
}

impl SubmitFieldReportHandler {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        missions: Arc<dyn MissionRepository>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            interventions,
            missions,
            dispatcher,
        }
    }

    pub async fn handle(&self, cmd: SubmitFieldReportCommand) -> Result<Intervention, WorkflowError> {
        let mut intervention = self
            .interventions
            .find_by_id(&cmd.intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", cmd.intervention_id))?;

        require_ownership(&cmd.actor, intervention.intervenant_id(), "intervention.field_report")?;

        let mission = self
            .missions
            .find_by_id(intervention.mission_id())
            .await?
            .ok_or_else(|| WorkflowError::not_found("Mission", intervention.mission_id()))?;
        if !mission.is_completed() {
            return Err(WorkflowError::invalid_transition(
                "A field report can only be recorded once the mission is completed",
            ));
        }

        intervention.record_field_report(cmd.report);
        self.interventions.update(&intervention).await?;

        let recipient = match mission.assignee_id() {
            Some(assignee) => Some(*assignee),
            None => self.dispatcher.first_admin().await?,
        };
        if let Some(recipient) = recipient {
            self.dispatcher
                .notify(
                    &recipient,
                    NotificationKind::CompteRenduIntervention,
                    messages::field_report_submitted(intervention.title()),
                )
                .await?;
        }

        Ok(intervention.next_version())
    }
}
