//! Intervention aggregate entity.
//!
//! # State machine
//!
//! `en_attente -> en_cours -> terminee`, driven only by the assigned
//! intervenant through `start` and `finish`.
//!
//! # Delay flags
//!
//! `flag_late` is the single entry point used by both the detection engine
//! and manual delay creation. It is a no-op on an already late intervention,
//! which is what makes detection idempotent.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::values::{DelayFlags, FieldReport, Priority};
use crate::domain::foundation::authorization::require_ownership;
use crate::domain::foundation::{
    impl_versioned, Actor, DomainError, InterventionId, InterventionStatus, MissionId,
    StateMachine, Timestamp, UserId,
};

/// Maximum length for intervention title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Fields supplied when creating an intervention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIntervention {
    pub mission_id: MissionId,
    pub title: String,
    pub intervenant_id: Option<UserId>,
    pub scheduled_date: NaiveDate,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub resources: String,
}

/// Editable fields. `None` leaves the field unchanged; for the intervenant
/// `Some(None)` unassigns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionChanges {
    pub title: Option<String>,
    pub intervenant_id: Option<Option<UserId>>,
    pub scheduled_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub resources: Option<String>,
}

/// Intervention aggregate.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `started_at` is set once status leaves `en_attente`
/// - `finished_at` is set once status is `terminee`
/// - `delay.late` implies `delay.late_since` is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervention {
    id: InterventionId,
    mission_id: MissionId,
    title: String,
    intervenant_id: Option<UserId>,
    created_by: Option<UserId>,
    scheduled_date: NaiveDate,
    due_date: NaiveDate,
    priority: Priority,
    resources: String,
    status: InterventionStatus,
    started_at: Option<Timestamp>,
    finished_at: Option<Timestamp>,
    field_report: FieldReport,
    delay: DelayFlags,
    created_at: Timestamp,
    version: i64,
}

impl Intervention {
    /// Create a new pending intervention.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title is empty or too long
    pub fn new(
        id: InterventionId,
        fields: NewIntervention,
        created_by: UserId,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        Self::validate_title(&fields.title)?;

        Ok(Self {
            id,
            mission_id: fields.mission_id,
            title: fields.title,
            intervenant_id: fields.intervenant_id,
            created_by: Some(created_by),
            scheduled_date: fields.scheduled_date,
            due_date: fields.due_date,
            priority: fields.priority,
            resources: fields.resources,
            status: InterventionStatus::Pending,
            started_at: None,
            finished_at: None,
            field_report: FieldReport::default(),
            delay: DelayFlags::default(),
            created_at: now,
            version: 0,
        })
    }

    /// Reconstitute an intervention from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: InterventionId,
        mission_id: MissionId,
        title: String,
        intervenant_id: Option<UserId>,
        created_by: Option<UserId>,
        scheduled_date: NaiveDate,
        due_date: NaiveDate,
        priority: Priority,
        resources: String,
        status: InterventionStatus,
        started_at: Option<Timestamp>,
        finished_at: Option<Timestamp>,
        field_report: FieldReport,
        delay: DelayFlags,
        created_at: Timestamp,
        version: i64,
    ) -> Self {
        Self {
            id,
            mission_id,
            title,
            intervenant_id,
            created_by,
            scheduled_date,
            due_date,
            priority,
            resources,
            status,
            started_at,
            finished_at,
            field_report,
            delay,
            created_at,
            version,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> &InterventionId {
        &self.id
    }

    pub fn mission_id(&self) -> &MissionId {
        &self.mission_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn intervenant_id(&self) -> Option<&UserId> {
        self.intervenant_id.as_ref()
    }

    pub fn created_by(&self) -> Option<&UserId> {
        self.created_by.as_ref()
    }

    pub fn scheduled_date(&self) -> NaiveDate {
        self.scheduled_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn resources(&self) -> &str {
        &self.resources
    }

    pub fn status(&self) -> InterventionStatus {
        self.status
    }

    pub fn started_at(&self) -> Option<&Timestamp> {
        self.started_at.as_ref()
    }

    pub fn finished_at(&self) -> Option<&Timestamp> {
        self.finished_at.as_ref()
    }

    pub fn field_report(&self) -> &FieldReport {
        &self.field_report
    }

    pub fn delay(&self) -> &DelayFlags {
        &self.delay
    }

    pub fn is_late(&self) -> bool {
        self.delay.late
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    // ───────────────────────────────────────────────────────────────
    // State machine
    // ───────────────────────────────────────────────────────────────

    /// Starts the intervention.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the actor is not the assigned intervenant
    /// - `InvalidStateTransition` if the intervention is not pending
    pub fn start(&mut self, actor: &Actor, now: Timestamp) -> Result<(), DomainError> {
        require_ownership(actor, self.intervenant_id.as_ref(), "intervention.start")?;
        self.status = self.status.transition_to(InterventionStatus::InProgress)?;
        self.started_at = Some(now);
        Ok(())
    }

    /// Finishes the intervention.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the actor is not the assigned intervenant
    /// - `InvalidStateTransition` if the intervention is not in progress
    pub fn finish(&mut self, actor: &Actor, now: Timestamp) -> Result<(), DomainError> {
        require_ownership(actor, self.intervenant_id.as_ref(), "intervention.finish")?;
        self.status = self.status.transition_to(InterventionStatus::Completed)?;
        self.finished_at = Some(now);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Delay bookkeeping
    // ───────────────────────────────────────────────────────────────

    /// Selection predicate of the detection engine: open, past its due
    /// date and not already flagged.
    pub fn is_detection_candidate(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.due_date < today && !self.delay.late
    }

    /// Marks the intervention late as of `now`.
    ///
    /// Returns false (and changes nothing) if it is already late.
    pub fn flag_late(&mut self, now: Timestamp) -> bool {
        if self.delay.late {
            return false;
        }
        self.delay.late = true;
        self.delay.late_since = Some(now);
        self.delay.resolved = false;
        self.delay.duration_secs = None;
        true
    }

    /// Undoes `flag_late` when the rest of a detection step failed.
    pub fn clear_late_flag(&mut self) {
        self.delay.late = false;
        self.delay.late_since = None;
    }

    /// Records that a delay episode of this intervention was resolved.
    pub fn mark_delay_resolved(&mut self) {
        self.delay.resolved = true;
    }

    /// Time elapsed since the delay began, while late and unresolved.
    pub fn current_delay(&self, now: Timestamp) -> Option<Duration> {
        if !self.delay.late || self.delay.resolved {
            return None;
        }
        self.delay.late_since.map(|since| now.duration_since(&since))
    }

    /// Updates the delay reason and resolution flag directly.
    ///
    /// Resolving clears the late flag and caches the elapsed delay.
    pub fn manage_delay(&mut self, reason: String, resolved: bool, now: Timestamp) {
        self.delay.reason = reason;
        if resolved && !self.delay.resolved {
            self.delay.duration_secs = self.current_delay(now).map(|d| d.num_seconds());
        }
        self.delay.resolved = resolved;
        if resolved {
            self.delay.late = false;
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Other mutations
    // ───────────────────────────────────────────────────────────────

    /// Time between start and finish, once both are known.
    pub fn work_duration(&self) -> Option<Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end.duration_since(&start)),
            _ => None,
        }
    }

    /// Applies an edit. Returns true if the intervenant changed.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new title is empty or too long
    pub fn update_details(&mut self, changes: InterventionChanges) -> Result<bool, DomainError> {
        if let Some(title) = &changes.title {
            Self::validate_title(title)?;
        }

        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(date) = changes.scheduled_date {
            self.scheduled_date = date;
        }
        if let Some(date) = changes.due_date {
            self.due_date = date;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(resources) = changes.resources {
            self.resources = resources;
        }

        let mut reassigned = false;
        if let Some(intervenant_id) = changes.intervenant_id {
            reassigned = self.intervenant_id != intervenant_id;
            self.intervenant_id = intervenant_id;
        }
        Ok(reassigned)
    }

    /// Stores the intervenant's field report.
    pub fn record_field_report(&mut self, report: FieldReport) {
        self.field_report = report;
    }

    fn validate_title(title: &str) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Title cannot exceed {} characters", MAX_TITLE_LENGTH),
            ));
        }
        Ok(())
    }
}

impl_versioned!(Intervention);
