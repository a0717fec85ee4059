//! InterventionReport aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::authorization::{require_admin, require_ownership};
use crate::domain::foundation::{
    impl_versioned, Actor, DomainError, InterventionId, ReportId, ReportStatus, StateMachine,
    Timestamp, UserId,
};

/// Free-text body of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportContent {
    pub works_done: String,
    pub final_result: String,
    pub resources_used: String,
    pub improvements: String,
}

/// Intervention report aggregate.
///
/// # Invariants
///
/// - exactly one of `validated_by` / `rejected_by` is set once the status is
///   `valide` or `rejete`, neither before
/// - `rejection_reason` is non-empty while `rejete`
/// - a `valide` report never changes again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionReport {
    id: ReportId,
    intervention_id: InterventionId,
    content: ReportContent,
    status: ReportStatus,
    rejection_reason: String,
    validation_comment: String,
    validated_by: Option<UserId>,
    rejected_by: Option<UserId>,
    validated_at: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: i64,
}

impl InterventionReport {
    /// Drafts the report of an intervention.
    ///
    /// `intervenant` is the intervention's assigned user.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the actor is not the intervenant
    pub fn new(
        id: ReportId,
        intervention_id: InterventionId,
        intervenant: Option<&UserId>,
        actor: &Actor,
        content: ReportContent,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        require_ownership(actor, intervenant, "report.create")?;

        Ok(Self {
            id,
            intervention_id,
            content,
            status: ReportStatus::Draft,
            rejection_reason: String::new(),
            validation_comment: String::new(),
            validated_by: None,
            rejected_by: None,
            validated_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Reconstitute a report from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ReportId,
        intervention_id: InterventionId,
        content: ReportContent,
        status: ReportStatus,
        rejection_reason: String,
        validation_comment: String,
        validated_by: Option<UserId>,
        rejected_by: Option<UserId>,
        validated_at: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: i64,
    ) -> Self {
        Self {
            id,
            intervention_id,
            content,
            status,
            rejection_reason,
            validation_comment,
            validated_by,
            rejected_by,
            validated_at,
            created_at,
            updated_at,
            version,
        }
    }

    pub fn id(&self) -> &ReportId {
        &self.id
    }

    pub fn intervention_id(&self) -> &InterventionId {
        &self.intervention_id
    }

    pub fn content(&self) -> &ReportContent {
        &self.content
    }

    pub fn status(&self) -> ReportStatus {
        self.status
    }

    pub fn rejection_reason(&self) -> &str {
        &self.rejection_reason
    }

    pub fn validation_comment(&self) -> &str {
        &self.validation_comment
    }

    pub fn validated_by(&self) -> Option<&UserId> {
        self.validated_by.as_ref()
    }

    pub fn rejected_by(&self) -> Option<&UserId> {
        self.rejected_by.as_ref()
    }

    pub fn validated_at(&self) -> Option<&Timestamp> {
        self.validated_at.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// Replaces the content while the report is a draft or was rejected.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the actor is not the intervenant
    /// - `InvalidStateTransition` if the report is submitted or validated
    pub fn update_content(
        &mut self,
        actor: &Actor,
        intervenant: Option<&UserId>,
        content: ReportContent,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        require_ownership(actor, intervenant, "report.edit")?;
        if !self.status.is_editable() {
            return Err(DomainError::invalid_transition(format!(
                "Report cannot be edited while {}",
                self.status
            )));
        }
        self.content = content;
        self.updated_at = now;
        Ok(())
    }

    /// `brouillon | rejete -> soumis`.
    ///
    /// Resubmitting a rejected report wipes the previous review.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the actor is not the intervenant
    /// - `InvalidStateTransition` if the report is submitted or validated
    pub fn submit(
        &mut self,
        actor: &Actor,
        intervenant: Option<&UserId>,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        require_ownership(actor, intervenant, "report.submit")?;
        let previous = self.status;
        self.status = self.status.transition_to(ReportStatus::Submitted)?;
        if previous == ReportStatus::Rejected {
            self.rejection_reason.clear();
            self.validation_comment.clear();
            self.validated_by = None;
            self.rejected_by = None;
            self.validated_at = None;
        }
        self.updated_at = now;
        Ok(())
    }

    /// `soumis -> valide`.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless the actor is an administrator
    /// - `InvalidStateTransition` unless the report is submitted
    pub fn validate(
        &mut self,
        actor: &Actor,
        comment: String,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        require_admin(actor, "report.validate")?;
        self.status = self.status.transition_to(ReportStatus::Validated)?;
        self.validated_by = Some(actor.user_id);
        self.rejected_by = None;
        self.validation_comment = comment;
        self.rejection_reason.clear();
        self.validated_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// `soumis -> rejete`.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless the actor is an administrator
    /// - `InvalidStateTransition` unless the report is submitted
    /// - `ValidationFailed` if `reason` is blank
    pub fn reject(
        &mut self,
        actor: &Actor,
        reason: String,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        require_admin(actor, "report.reject")?;
        if !self.status.can_transition_to(&ReportStatus::Rejected) {
            return Err(DomainError::invalid_transition(format!(
                "Cannot reject a report that is {}",
                self.status
            )));
        }
        if reason.trim().is_empty() {
            return Err(DomainError::validation(
                "rejection_reason",
                "A reason is required to reject a report",
            ));
        }
        self.status = ReportStatus::Rejected;
        self.rejection_reason = reason;
        self.validation_comment.clear();
        self.rejected_by = Some(actor.user_id);
        self.validated_by = None;
        self.validated_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

impl_versioned!(InterventionReport);
