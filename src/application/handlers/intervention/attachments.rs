//! Attachment handlers - add and remove files on an intervention.
//!
//! Both refuse once the intervention's report is validated.

use std::sync::Arc;

use crate::domain::attachment::{Attachment, AttachmentKind};
use crate::domain::foundation::authorization::require_admin_or_any_owner;
use crate::domain::foundation::{Actor, AttachmentId, InterventionId, WorkflowError};
use crate::domain::intervention::ensure_unlocked;
use crate::ports::{AttachmentRepository, Clock, InterventionRepository, ReportRepository};

/// Command to attach a file.
#[derive(Debug, Clone)]
pub struct AddAttachmentCommand {
    pub actor: Actor,
    pub intervention_id: InterventionId,
    pub title: String,
    pub file_ref: String,
    pub kind: AttachmentKind,
    pub description: String,
}

/// Command to remove an attachment.
#[derive(Debug, Clone)]
pub struct RemoveAttachmentCommand {
    pub actor: Actor,
    pub attachment_id: AttachmentId,
}

/// Shared lookups: the intervention must exist, the actor must be admin,
/// creator or intervenant, and the report must not be validated.
#[derive(Clone)]
struct AttachmentGuard {
    interventions: Arc<dyn InterventionRepository>,
    reports: Arc<dyn ReportRepository>,
}

impl AttachmentGuard {
    async fn check(
        &self,
        actor: &Actor,
        intervention_id: &InterventionId,
        action: &'static str,
    ) -> Result<(), WorkflowError> {
        let intervention = self
            .interventions
            .find_by_id(intervention_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Intervention", intervention_id))?;
        require_admin_or_any_owner(
            actor,
            &[intervention.created_by(), intervention.intervenant_id()],
            action,
        )?;
        let report = self.reports.find_by_intervention(intervention_id).await?;
        ensure_unlocked(report.as_ref())?;
        Ok(())
    }
}

pub struct AddAttachmentHandler {
    guard: AttachmentGuard,
    attachments: Arc<dyn AttachmentRepository>,
    clock: Arc<dyn Clock>,
}

impl AddAttachmentHandler {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        reports: Arc<dyn ReportRepository>,
        attachments: Arc<dyn AttachmentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            guard: AttachmentGuard {
                interventions,
                reports,
            },
            attachments,
            clock,
        }
    }

    pub async fn handle(&self, cmd: AddAttachmentCommand) -> Result<Attachment, WorkflowError> {
        self.guard
            .check(&cmd.actor, &cmd.intervention_id, "attachment.add")
            .await?;

        let attachment = Attachment::new(
            AttachmentId::new(),
            cmd.intervention_id,
            cmd.title,
            cmd.file_ref,
            cmd.kind,
            cmd.description,
            self.clock.now(),
        )?;
        self.attachments.save(&attachment).await?;
        Ok(attachment)
    }
}

pub struct RemoveAttachmentHandler {
    guard: AttachmentGuard,
    attachments: Arc<dyn AttachmentRepository>,
}

impl RemoveAttachmentHandler {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        reports: Arc<dyn ReportRepository>,
        attachments: Arc<dyn AttachmentRepository>,
    ) -> Self {
        Self {
            guard: AttachmentGuard {
                interventions,
                reports,
            },
            attachments,
        }
    }

    pub async fn handle(&self, cmd: RemoveAttachmentCommand) -> Result<(), WorkflowError> {
        let attachment = self
            .attachments
            .find_by_id(&cmd.attachment_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Attachment", cmd.attachment_id))?;

        self.guard
            .check(&cmd.actor, attachment.intervention_id(), "attachment.remove")
            .await?;

        self.attachments.delete(&cmd.attachment_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{date, TestWorld};
    use crate::domain::foundation::{ReportId, ReportStatus, Role, Timestamp, UserId};
    use crate::domain::report::{InterventionReport, ReportContent};

    fn add_handler(world: &TestWorld) -> AddAttachmentHandler {
        AddAttachmentHandler::new(
            world.interventions.clone(),
            world.reports.clone(),
            world.attachments.clone(),
            world.clock.clone(),
        )
    }

    fn add_cmd(actor: Actor, intervention_id: InterventionId) -> AddAttachmentCommand {
        AddAttachmentCommand {
            actor,
            intervention_id,
            title: "Meter photo".to_string(),
            file_ref: "uploads/meter.jpg".to_string(),
            kind: AttachmentKind::Photo,
            description: String::new(),
        }
    }

    async fn validate_report_of(world: &TestWorld, intervention_id: InterventionId) {
        let now = Timestamp::from_unix_secs(0);
        let report = InterventionReport::reconstitute(
            ReportId::new(),
            intervention_id,
            ReportContent::default(),
            ReportStatus::Validated,
            String::new(),
            String::new(),
            Some(UserId::new()),
            None,
            Some(now),
            now,
            now,
            2,
        );
        world.reports.save(&report).await.unwrap();
    }

    #[tokio::test]
    async fn intervenant_adds_and_removes() {
        let world = TestWorld::new();
        let tech = world.user("tech", Role::Employee).await;
        let mission = world.mission(None).await;
        let intervention = world
            .intervention(mission.id(), Some(tech.user_id), date(2024, 1, 10))
            .await;

        let attachment = add_handler(&world)
            .handle(add_cmd(tech, *intervention.id()))
            .await
            .unwrap();
        assert_eq!(
            world.attachments.find_by_intervention(intervention.id()).await.unwrap().len(),
            1
        );

        RemoveAttachmentHandler::new(
            world.interventions.clone(),
            world.reports.clone(),
            world.attachments.clone(),
        )
        .handle(RemoveAttachmentCommand {
            actor: tech,
            attachment_id: *attachment.id(),
        })
        .await
        .unwrap();
        assert!(world
            .attachments
            .find_by_intervention(intervention.id())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn locked_intervention_refuses_new_attachment() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let mission = world.mission(None).await;
        let intervention = world.intervention(mission.id(), None, date(2024, 1, 10)).await;
        validate_report_of(&world, *intervention.id()).await;

        let result = add_handler(&world).handle(add_cmd(admin, *intervention.id())).await;

        assert_eq!(result.unwrap_err(), WorkflowError::Locked);
    }

    #[tokio::test]
    async fn blank_file_is_validation_error() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let mission = world.mission(None).await;
        let intervention = world.intervention(mission.id(), None, date(2024, 1, 10)).await;
        let mut cmd = add_cmd(admin, *intervention.id());
        cmd.file_ref = "  ".to_string();

        let result = add_handler(&world).handle(cmd).await;

        assert!(matches!(result, Err(WorkflowError::Validation { field, .. }) if field == "file_ref"));
    }
}
