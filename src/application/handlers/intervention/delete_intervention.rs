//! DeleteInterventionHandler - removes an intervention.

use std::sync::Arc;

use crate::domain::foundation::authorization::require_admin_or_owner;
use crate::domain::foundation::{Actor, InterventionId, WorkflowError};
use crate::domain::intervention::ensure_unlocked;
use crate::ports::{AttachmentRepository, InterventionRepository, ReportRepository};

/// Command to delete an intervention.
#[derive(Debug, Clone)]
pub struct DeleteInterventionCommand {
    pub actor: Actor,
    pub intervention_id: InterventionId,
}

/// Handler for deleting interventions. Admin or creator, and never once
/// the report is validated. Attachments go with the intervention.
pub struct DeleteInterventionHandler {
    interventions: Arc<dyn InterventionRepository>,
    reports: Arc<dyn ReportRepository>,
    attachments: Arc<dyn AttachmentRepository>,
}

impl DeleteInterventionHandler {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        reports: Arc<dyn ReportRepository>,
        attachments: Arc<dyn AttachmentRepository>,
    ) -> Self {
        Self {
            interventions,
            reports,
            attachments,
        }
    }

    pub async fn handle(&self, cmd: DeleteInterventionCommand) -> Result<(), WorkflowError> {
        let intervention = self
            .interventions
            .find_by_id(&cmd.intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", cmd.intervention_id))?;

        require_admin_or_owner(&cmd.actor, intervention.created_by(), "intervention.delete")?;
        let report = self.reports.find_by_intervention(&cmd.intervention_id).await?;
        ensure_unlocked(report.as_ref())?;

        for attachment in self.attachments.find_by_intervention(&cmd.intervention_id).await? {
            self.attachments.delete(attachment.id()).await?;
        }
        self.interventions.delete(&cmd.intervention_id).await?;

        tracing::info!(intervention_id = %cmd.intervention_id, "intervention deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{date, TestWorld};
    use crate::domain::attachment::{Attachment, AttachmentKind};
    use crate::domain::foundation::{AttachmentId, Role};

    #[tokio::test]
    async fn admin_deletes_intervention_and_attachments() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let mission = world.mission(None).await;
        let intervention = world.intervention(mission.id(), None, date(2024, 1, 10)).await;
        let attachment = Attachment::new(
            AttachmentId::new(),
            *intervention.id(),
            "Photo".to_string(),
            "uploads/a.jpg".to_string(),
            AttachmentKind::Photo,
            String::new(),
            world.now(),
        )
        .unwrap();
        world.attachments.save(&attachment).await.unwrap();

        let handler = DeleteInterventionHandler::new(
            world.interventions.clone(),
            world.reports.clone(),
            world.attachments.clone(),
        );
        handler
            .handle(DeleteInterventionCommand {
                actor: admin,
                intervention_id: *intervention.id(),
            })
            .await
            .unwrap();

        assert!(world.interventions.find_by_id(intervention.id()).await.unwrap().is_none());
        assert!(world.attachments.find_by_id(attachment.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn employee_who_did_not_create_it_is_refused() {
        let world = TestWorld::new();
        let tech = world.user("tech", Role::Employee).await;
        let mission = world.mission(None).await;
        let intervention = world
            .intervention(mission.id(), Some(tech.user_id), date(2024, 1, 10))
            .await;

        let handler = DeleteInterventionHandler::new(
            world.interventions.clone(),
            world.reports.clone(),
            world.attachments.clone(),
        );
        let result = handler
            .handle(DeleteInterventionCommand {
                actor: tech,
                intervention_id: *intervention.id(),
            })
            .await;

        assert!(matches!(result, Err(WorkflowError::Unauthorized(_))));
    }
}
