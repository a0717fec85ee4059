//! MissionStatus enum for tracking the lifecycle of a client mission.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MissionStatus {
    #[default]
    #[serde(rename = "en_attente")]
    Pending,
    #[serde(rename = "en_cours")]
    InProgress,
    #[serde(rename = "terminee")]
    Completed,
}

impl MissionStatus {
    /// Returns the persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::Pending => "en_attente",
            MissionStatus::InProgress => "en_cours",
            MissionStatus::Completed => "terminee",
        }
    }
}

impl StateMachine for MissionStatus {
    /// Valid transitions:
    /// - Pending -> InProgress
    /// - InProgress -> Completed
    fn can_transition_to(&self, target: &Self) -> bool {
        use MissionStatus::*;
        matches!((self, target), (Pending, InProgress) | (InProgress, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            MissionStatus::Pending => vec![MissionStatus::InProgress],
            MissionStatus::InProgress => vec![MissionStatus::Completed],
            MissionStatus::Completed => vec![],
        }
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_attente" => Ok(MissionStatus::Pending),
            "en_cours" => Ok(MissionStatus::InProgress),
            "terminee" => Ok(MissionStatus::Completed),
            other => Err(ValidationError::invalid_format(
                "mission_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}
