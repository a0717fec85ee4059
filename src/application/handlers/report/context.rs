//! Lookups and notifications shared by the report handlers.

use std::sync::Arc;

use crate::application::NotificationDispatcher;
use crate::domain::foundation::{InterventionId, ReportId, WorkflowError};
use crate::domain::intervention::Intervention;
use crate::domain::notification::{messages, NotificationKind};
use crate::domain::report::InterventionReport;
use crate::ports::{InterventionRepository, MissionRepository, ReportRepository};

#[derive(Clone)]
pub(super) struct ReportContext {
    pub reports: Arc<dyn ReportRepository>,
    pub interventions: Arc<dyn InterventionRepository>,
    pub missions: Arc<dyn MissionRepository>,
    pub dispatcher: NotificationDispatcher,
}

impl ReportContext {
    pub async fn load_report(&self, id: &ReportId) -> Result<InterventionReport, WorkflowError> {
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Report", id))
    }

    pub async fn load_intervention(&self, id: &InterventionId) -> Result<Intervention, WorkflowError> {
        self.interventions
            .find_by_id(id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", id))
    }

    /// Tells every administrator a report awaits review.
    pub async fn announce_submission(&self, intervention: &Intervention) -> Result<(), WorkflowError> {
        let mission_title = self
            .missions
            .find_by_id(intervention.mission_id())
            .await?
            .map(|m| m.title().to_string())
            .unwrap_or_else(|| intervention.title().to_string());

        let sent = self
            .dispatcher
            .notify_admins(
                NotificationKind::NouveauRapportIntervention,
                &messages::report_submitted(&mission_title),
                None,
            )
            .await?;
        tracing::info!(
            intervention_id = %intervention.id(),
            admins = sent,
            "report submitted for review"
        );
        Ok(())
    }

    /// Sends the review outcome to the intervenant, if there is one.
    pub async fn notify_intervenant(
        &self,
        intervention: &Intervention,
        kind: NotificationKind,
        message: String,
    ) -> Result<(), WorkflowError> {
        if let Some(intervenant_id) = intervention.intervenant_id() {
            self.dispatcher.notify(intervenant_id, kind, message).await?;
        }
        Ok(())
    }
}
