//! Status enums of an intervention.
//!
//! `InterventionStatus` is the workflow state driven by start/finish.
//! `InterventionOutcome` is the looser state the intervenant reports in the
//! field report; it takes no part in transitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Workflow status of an intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterventionStatus {
    #[default]
    #[serde(rename = "en_attente")]
    Pending,
    #[serde(rename = "en_cours")]
    InProgress,
    #[serde(rename = "terminee")]
    Completed,
}

impl InterventionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionStatus::Pending => "en_attente",
            InterventionStatus::InProgress => "en_cours",
            InterventionStatus::Completed => "terminee",
        }
    }

    /// Pending and in-progress interventions can still become late.
    pub fn is_open(&self) -> bool {
        !matches!(self, InterventionStatus::Completed)
    }
}

impl StateMachine for InterventionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use InterventionStatus::*;
        matches!((self, target), (Pending, InProgress) | (InProgress, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            InterventionStatus::Pending => vec![InterventionStatus::InProgress],
            InterventionStatus::InProgress => vec![InterventionStatus::Completed],
            InterventionStatus::Completed => vec![],
        }
    }
}

impl fmt::Display for InterventionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterventionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_attente" => Ok(InterventionStatus::Pending),
            "en_cours" => Ok(InterventionStatus::InProgress),
            "terminee" => Ok(InterventionStatus::Completed),
            other => Err(ValidationError::invalid_format(
                "intervention_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// Outcome recorded by the intervenant (`etat_intervention`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterventionOutcome {
    #[default]
    #[serde(rename = "en_attente")]
    Pending,
    #[serde(rename = "en_cours")]
    InProgress,
    #[serde(rename = "terminee")]
    Completed,
    #[serde(rename = "resolue")]
    Resolved,
    #[serde(rename = "non_resolue")]
    Unresolved,
}

impl InterventionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionOutcome::Pending => "en_attente",
            InterventionOutcome::InProgress => "en_cours",
            InterventionOutcome::Completed => "terminee",
            InterventionOutcome::Resolved => "resolue",
            InterventionOutcome::Unresolved => "non_resolue",
        }
    }
}

impl fmt::Display for InterventionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterventionOutcome {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_attente" => Ok(InterventionOutcome::Pending),
            "en_cours" => Ok(InterventionOutcome::InProgress),
            "terminee" => Ok(InterventionOutcome::Completed),
            "resolue" => Ok(InterventionOutcome::Resolved),
            "non_resolue" => Ok(InterventionOutcome::Unresolved),
            other => Err(ValidationError::invalid_format(
                "etat_intervention",
                format!("unknown outcome '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_is_linear() {
        use InterventionStatus::*;
        assert!(Pending.can_transition_to(&InProgress));
        assert!(InProgress.can_transition_to(&Completed));
        assert!(!Pending.can_transition_to(&Completed));
        assert!(!InProgress.can_transition_to(&Pending));
        assert!(Completed.is_terminal());
    }

    #[test]
    fn transition_to_reports_invalid_transition() {
        let err = InterventionStatus::Completed
            .transition_to(InterventionStatus::InProgress)
            .unwrap_err();
        assert_eq!(err.code, super::super::ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn only_completed_is_closed() {
        assert!(InterventionStatus::Pending.is_open());
        assert!(InterventionStatus::InProgress.is_open());
        assert!(!InterventionStatus::Completed.is_open());
    }

    #[test]
    fn outcome_parses_all_persisted_values() {
        for outcome in [
            InterventionOutcome::Pending,
            InterventionOutcome::InProgress,
            InterventionOutcome::Completed,
            InterventionOutcome::Resolved,
            InterventionOutcome::Unresolved,
        ] {
            assert_eq!(outcome.as_str().parse::<InterventionOutcome>().unwrap(), outcome);
        }
    }

    #[test]
    fn outcome_serializes_to_persisted_value() {
        assert_eq!(
            serde_json::to_string(&InterventionOutcome::Unresolved).unwrap(),
            "\"non_resolue\""
        );
    }
}
