//! ReportStatus enum for the validation workflow of intervention reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of an intervention report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReportStatus {
    #[default]
    #[serde(rename = "brouillon")]
    Draft,
    #[serde(rename = "soumis")]
    Submitted,
    #[serde(rename = "valide")]
    Validated,
    #[serde(rename = "rejete")]
    Rejected,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "brouillon",
            ReportStatus::Submitted => "soumis",
            ReportStatus::Validated => "valide",
            ReportStatus::Rejected => "rejete",
        }
    }

    /// Returns true if the intervenant may still edit the content.
    pub fn is_editable(&self) -> bool {
        matches!(self, ReportStatus::Draft | ReportStatus::Rejected)
    }
}

impl StateMachine for ReportStatus {
    /// Valid transitions:
    /// - Draft -> Submitted
    /// - Rejected -> Submitted
    /// - Submitted -> Validated | Rejected
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReportStatus::*;
        matches!(
            (self, target),
            (Draft, Submitted) | (Rejected, Submitted) | (Submitted, Validated) | (Submitted, Rejected)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReportStatus::*;
        match self {
            Draft | Rejected => vec![Submitted],
            Submitted => vec![Validated, Rejected],
            Validated => vec![],
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brouillon" => Ok(ReportStatus::Draft),
            "soumis" => Ok(ReportStatus::Submitted),
            "valide" => Ok(ReportStatus::Validated),
            "rejete" => Ok(ReportStatus::Rejected),
            other => Err(ValidationError::invalid_format(
                "report_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_draft() {
        assert_eq!(ReportStatus::default(), ReportStatus::Draft);
    }

    #[test]
    fn validated_is_terminal() {
        assert!(ReportStatus::Validated.is_terminal());
        assert!(!ReportStatus::Validated.can_transition_to(&ReportStatus::Submitted));
    }

    #[test]
    fn rejected_can_be_resubmitted() {
        assert!(ReportStatus::Rejected.can_transition_to(&ReportStatus::Submitted));
    }

    #[test]
    fn draft_cannot_be_validated_directly() {
        assert!(!ReportStatus::Draft.can_transition_to(&ReportStatus::Validated));
        assert!(!ReportStatus::Draft.can_transition_to(&ReportStatus::Rejected));
    }

    #[test]
    fn only_draft_and_rejected_are_editable() {
        assert!(ReportStatus::Draft.is_editable());
        assert!(ReportStatus::Rejected.is_editable());
        assert!(!ReportStatus::Submitted.is_editable());
        assert!(!ReportStatus::Validated.is_editable());
    }

    #[test]
    fn serde_uses_persisted_values() {
        assert_eq!(serde_json::to_string(&ReportStatus::Rejected).unwrap(), "\"rejete\"");
        let status: ReportStatus = serde_json::from_str("\"valide\"").unwrap();
        assert_eq!(status, ReportStatus::Validated);
    }
}
