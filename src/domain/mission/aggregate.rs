//! Mission aggregate entity.
//!
//! A mission is the unit of work sold to a client. It groups interventions
//! and may be assigned to one user who coordinates them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    impl_versioned, ClientId, DomainError, MissionId, MissionStatus, StateMachine, Timestamp,
    UserId,
};

/// Maximum length for mission title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Fields supplied when creating a mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMission {
    pub client_id: ClientId,
    pub title: String,
    pub description: String,
    pub nature: String,
    pub start_date: NaiveDate,
    pub place: String,
    /// Free-text label, e.g. "monthly". Never interpreted.
    pub frequency: String,
    pub assignee_id: Option<UserId>,
}

/// Mission aggregate.
///
/// # Invariants
///
/// - `title` is 1-255 characters, non-empty
/// - `status` only moves forward (`en_attente -> en_cours -> terminee`)
/// - `version` increases by one on every successful store update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    id: MissionId,
    client_id: ClientId,
    title: String,
    description: String,
    nature: String,
    start_date: NaiveDate,
    place: String,
    frequency: String,
    assignee_id: Option<UserId>,
    status: MissionStatus,
    created_at: Timestamp,
    version: i64,
}

impl Mission {
    /// Create a new pending mission.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title is empty or too long
    pub fn new(id: MissionId, fields: NewMission, now: Timestamp) -> Result<Self, DomainError> {
        Self::validate_title(&fields.title)?;

        Ok(Self {
            id,
            client_id: fields.client_id,
            title: fields.title,
            description: fields.description,
            nature: fields.nature,
            start_date: fields.start_date,
            place: fields.place,
            frequency: fields.frequency,
            assignee_id: fields.assignee_id,
            status: MissionStatus::Pending,
            created_at: now,
            version: 0,
        })
    }

    /// Reconstitute a mission from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: MissionId,
        client_id: ClientId,
        title: String,
        description: String,
        nature: String,
        start_date: NaiveDate,
        place: String,
        frequency: String,
        assignee_id: Option<UserId>,
        status: MissionStatus,
        created_at: Timestamp,
        version: i64,
    ) -> Self {
        Self {
            id,
            client_id,
            title,
            description,
            nature,
            start_date,
            place,
            frequency,
            assignee_id,
            status,
            created_at,
            version,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> &MissionId {
        &self.id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn nature(&self) -> &str {
        &self.nature
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn frequency(&self) -> &str {
        &self.frequency
    }

    pub fn assignee_id(&self) -> Option<&UserId> {
        self.assignee_id.as_ref()
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn is_completed(&self) -> bool {
        self.status == MissionStatus::Completed
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Assigns the mission. Returns true if the assignee changed.
    pub fn assign(&mut self, assignee_id: Option<UserId>) -> bool {
        if self.assignee_id == assignee_id {
            return false;
        }
        self.assignee_id = assignee_id;
        true
    }

    /// Called when one of the mission's interventions starts.
    ///
    /// A pending mission moves to in progress; any other status is kept.
    /// Returns true if the status changed.
    pub fn promote_on_intervention_start(&mut self) -> bool {
        if self.status != MissionStatus::Pending {
            return false;
        }
        self.status = MissionStatus::InProgress;
        true
    }

    /// Closes the mission.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the mission is in progress
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(MissionStatus::Completed)?;
        Ok(())
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

impl_versioned!(Mission);
