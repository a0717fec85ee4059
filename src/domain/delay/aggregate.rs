//! Delay aggregate entity.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DelayKind;
use crate::domain::foundation::authorization::require_admin_or_owner;
use crate::domain::foundation::{
    format_day_month_year, impl_versioned, Actor, DelayId, DomainError, InterventionId, Timestamp,
    UserId,
};
use crate::domain::intervention::Intervention;

/// Fields a user supplies when reporting or editing a delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayDetails {
    pub kind: DelayKind,
    pub reason: String,
    pub impact: String,
    pub corrective_actions: String,
}

/// Reason written on automatically detected delays.
pub fn automatic_reason(due_date: NaiveDate) -> String {
    format!(
        "Intervention not carried out by its due date ({})",
        format_day_month_year(due_date)
    )
}

/// Delay episode of an intervention.
///
/// # Invariants
///
/// - `resolved` implies `ended_at` is set and
///   `duration_secs == ended_at - started_at`
/// - a resolved delay is never reopened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delay {
    id: DelayId,
    intervention_id: InterventionId,
    kind: DelayKind,
    started_at: Timestamp,
    ended_at: Option<Timestamp>,
    duration_secs: Option<i64>,
    reason: String,
    impact: String,
    corrective_actions: String,
    responsible_id: Option<UserId>,
    resolved: bool,
    created_at: Timestamp,
    version: i64,
}

impl Delay {
    /// Delay recorded by the detection engine for a missed due date.
    ///
    /// The intervenant, if any, becomes responsible for it.
    pub fn new_automatic(
        id: DelayId,
        intervention: &Intervention,
        impact: String,
        corrective_actions: String,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            intervention_id: *intervention.id(),
            kind: DelayKind::End,
            started_at: now,
            ended_at: None,
            duration_secs: None,
            reason: automatic_reason(intervention.due_date()),
            impact,
            corrective_actions,
            responsible_id: intervention.intervenant_id().copied(),
            resolved: false,
            created_at: now,
            version: 0,
        }
    }

    /// Delay reported by a user. The reporter becomes responsible for it.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless the actor is an administrator or the
    ///   intervention's intervenant
    /// - `ValidationFailed` if the reason is blank
    pub fn report(
        id: DelayId,
        intervention: &Intervention,
        actor: &Actor,
        details: DelayDetails,
        started_at: Timestamp,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        require_admin_or_owner(actor, intervention.intervenant_id(), "delay.create")?;
        Self::validate_reason(&details.reason)?;

        Ok(Self {
            id,
            intervention_id: *intervention.id(),
            kind: details.kind,
            started_at,
            ended_at: None,
            duration_secs: None,
            reason: details.reason,
            impact: details.impact,
            corrective_actions: details.corrective_actions,
            responsible_id: Some(actor.user_id),
            resolved: false,
            created_at: now,
            version: 0,
        })
    }

    /// Reconstitute a delay from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DelayId,
        intervention_id: InterventionId,
        kind: DelayKind,
        started_at: Timestamp,
        ended_at: Option<Timestamp>,
        duration_secs: Option<i64>,
        reason: String,
        impact: String,
        corrective_actions: String,
        responsible_id: Option<UserId>,
        resolved: bool,
        created_at: Timestamp,
        version: i64,
    ) -> Self {
        Self {
            id,
            intervention_id,
            kind,
            started_at,
            ended_at,
            duration_secs,
            reason,
            impact,
            corrective_actions,
            responsible_id,
            resolved,
            created_at,
            version,
        }
    }

    pub fn id(&self) -> &DelayId {
        &self.id
    }

    pub fn intervention_id(&self) -> &InterventionId {
        &self.intervention_id
    }

    pub fn kind(&self) -> DelayKind {
        self.kind
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn ended_at(&self) -> Option<&Timestamp> {
        self.ended_at.as_ref()
    }

    /// Cached duration in seconds, set on resolution.
    pub fn duration_secs(&self) -> Option<i64> {
        self.duration_secs
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn impact(&self) -> &str {
        &self.impact
    }

    pub fn corrective_actions(&self) -> &str {
        &self.corrective_actions
    }

    pub fn responsible_id(&self) -> Option<&UserId> {
        self.responsible_id.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// Length of the episode.
    ///
    /// Closed: `ended_at - started_at`. Open: `now - started_at`.
    pub fn duration_at(&self, now: Timestamp) -> Option<Duration> {
        match self.ended_at {
            Some(end) => Some(end.duration_since(&self.started_at)),
            None if !self.resolved => Some(now.duration_since(&self.started_at)),
            None => None,
        }
    }

    /// Closes the episode at `now`.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless the actor is responsible or an administrator
    /// - `InvalidStateTransition` if already resolved
    pub fn resolve(&mut self, actor: &Actor, now: Timestamp) -> Result<(), DomainError> {
        require_admin_or_owner(actor, self.responsible_id.as_ref(), "delay.resolve")?;
        self.ensure_open()?;

        self.resolved = true;
        self.ended_at = Some(now);
        self.duration_secs = Some(now.duration_since(&self.started_at).num_seconds());
        Ok(())
    }

    /// Edits an open episode.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless the actor is responsible or an administrator
    /// - `InvalidStateTransition` if already resolved
    /// - `ValidationFailed` if the reason is blank
    pub fn update_details(&mut self, actor: &Actor, details: DelayDetails) -> Result<(), DomainError> {
        require_admin_or_owner(actor, self.responsible_id.as_ref(), "delay.edit")?;
        self.ensure_open()?;
        Self::validate_reason(&details.reason)?;

        self.kind = details.kind;
        self.reason = details.reason;
        self.impact = details.impact;
        self.corrective_actions = details.corrective_actions;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.resolved {
            return Err(DomainError::invalid_transition("Delay is already resolved")
                .with_detail("delay_id", self.id.to_string()));
        }
        Ok(())
    }

    fn validate_reason(reason: &str) -> Result<(), DomainError> {
        if reason.trim().is_empty() {
            return Err(DomainError::validation("reason", "A delay reason is required"));
        }
        Ok(())
    }
}

impl_versioned!(Delay);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, MissionId, Role};
    use crate::domain::intervention::{NewIntervention, Priority};

    fn intervention(intervenant: Option<UserId>) -> Intervention {
        Intervention::new(
            InterventionId::new(),
            NewIntervention {
                mission_id: MissionId::new(),
                title: "Boiler service".to_string(),
                intervenant_id: intervenant,
                scheduled_date: NaiveDate::from_ymd_opt(2023, 12, 28).unwrap(),
                due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                priority: Priority::Normal,
                resources: String::new(),
            },
            UserId::new(),
            Timestamp::now(),
        )
        .unwrap()
    }

    fn details(reason: &str) -> DelayDetails {
        DelayDetails {
            kind: DelayKind::Technical,
            reason: reason.to_string(),
            impact: String::new(),
            corrective_actions: String::new(),
        }
    }

    fn automatic(responsible: Option<UserId>, now: Timestamp) -> Delay {
        Delay::new_automatic(
            DelayId::new(),
            &intervention(responsible),
            "impact".to_string(),
            "actions".to_string(),
            now,
        )
    }

    #[test]
    fn automatic_delay_names_missed_due_date() {
        let delay = automatic(None, Timestamp::now());
        assert_eq!(delay.kind(), DelayKind::End);
        assert!(delay.reason().contains("01/01/2024"));
        assert!(!delay.is_resolved());
    }

    #[test]
    fn automatic_delay_is_owned_by_intervenant() {
        let worker = UserId::new();
        let delay = automatic(Some(worker), Timestamp::now());
        assert_eq!(delay.responsible_id(), Some(&worker));
    }

    #[test]
    fn resolve_after_an_hour_stores_3600_seconds() {
        let start = Timestamp::from_unix_secs(1_704_067_200);
        let admin = Actor::new(UserId::new(), Role::Administrator);
        let mut delay = automatic(None, start);

        delay.resolve(&admin, start.plus_secs(3600)).unwrap();

        assert!(delay.is_resolved());
        assert_eq!(delay.duration_secs(), Some(3600));
        assert_eq!(delay.ended_at(), Some(&start.plus_secs(3600)));
        assert_eq!(
            delay.duration_at(start.plus_secs(99_999)),
            Some(Duration::seconds(3600))
        );
    }

    #[test]
    fn open_delay_duration_grows_with_now() {
        let start = Timestamp::from_unix_secs(1_704_067_200);
        let delay = automatic(None, start);
        assert_eq!(delay.duration_at(start.plus_secs(120)), Some(Duration::seconds(120)));
    }

    #[test]
    fn resolved_delay_without_end_has_no_duration() {
        let start = Timestamp::now();
        let delay = Delay::reconstitute(
            DelayId::new(),
            InterventionId::new(),
            DelayKind::Other,
            start,
            None,
            None,
            "legacy".to_string(),
            String::new(),
            String::new(),
            None,
            true,
            start,
            0,
        );
        assert!(delay.duration_at(start.plus_secs(5)).is_none());
    }

    #[test]
    fn resolve_twice_is_invalid_transition() {
        let admin = Actor::new(UserId::new(), Role::Administrator);
        let mut delay = automatic(None, Timestamp::now());
        delay.resolve(&admin, Timestamp::now()).unwrap();
        let err = delay.resolve(&admin, Timestamp::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn resolve_by_stranger_is_unauthorized() {
        let mut delay = automatic(Some(UserId::new()), Timestamp::now());
        let stranger = Actor::new(UserId::new(), Role::Employee);
        let err = delay.resolve(&stranger, Timestamp::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn responsible_user_can_resolve() {
        let worker = Actor::new(UserId::new(), Role::Freelancer);
        let mut delay = automatic(Some(worker.user_id), Timestamp::now());
        assert!(delay.resolve(&worker, Timestamp::now()).is_ok());
    }

    #[test]
    fn report_makes_reporter_responsible() {
        let worker = Actor::new(UserId::new(), Role::Employee);
        let i = intervention(Some(worker.user_id));
        let now = Timestamp::now();
        let delay = Delay::report(DelayId::new(), &i, &worker, details("Traffic"), now, now).unwrap();
        assert_eq!(delay.responsible_id(), Some(&worker.user_id));
        assert_eq!(delay.kind(), DelayKind::Technical);
    }

    #[test]
    fn report_by_unrelated_user_is_unauthorized() {
        let i = intervention(Some(UserId::new()));
        let other = Actor::new(UserId::new(), Role::Employee);
        let now = Timestamp::now();
        let err = Delay::report(DelayId::new(), &i, &other, details("x"), now, now).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn report_requires_reason() {
        let admin = Actor::new(UserId::new(), Role::Administrator);
        let i = intervention(None);
        let now = Timestamp::now();
        let err = Delay::report(DelayId::new(), &i, &admin, details(""), now, now).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn resolved_delay_cannot_be_edited() {
        let admin = Actor::new(UserId::new(), Role::Administrator);
        let mut delay = automatic(None, Timestamp::now());
        delay.resolve(&admin, Timestamp::now()).unwrap();
        let err = delay.update_details(&admin, details("new")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }
}
