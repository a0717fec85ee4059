//! Value objects carried by an intervention.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{InterventionOutcome, Timestamp, ValidationError};

/// Scheduling priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    #[default]
    #[serde(rename = "normale")]
    Normal,
    #[serde(rename = "urgente")]
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normale",
            Priority::Urgent => "urgente",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normale" => Ok(Priority::Normal),
            "urgente" => Ok(Priority::Urgent),
            other => Err(ValidationError::invalid_format(
                "priority",
                format!("unknown priority '{}'", other),
            )),
        }
    }
}

/// Delay bookkeeping kept on the intervention itself.
///
/// Invariant: `late == true` implies `late_since.is_some()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DelayFlags {
    /// `en_retard`
    pub late: bool,
    /// `date_retard`: when the delay began.
    pub late_since: Option<Timestamp>,
    /// `duree_retard`, cached when the delay is marked resolved.
    pub duration_secs: Option<i64>,
    /// `motif_retard`
    pub reason: String,
    /// `retard_resolu`
    pub resolved: bool,
}

/// Field report ("compte rendu") recorded by the intervenant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldReport {
    pub outcome: InterventionOutcome,
    pub arrival_time: Option<NaiveTime>,
    pub departure_time: Option<NaiveTime>,
    pub difficulties: String,
}

/// Renders a work duration as "2d 3h 15min", or "3h 15min" under a day.
pub fn format_work_duration(duration: Duration) -> String {
    let days = duration.num_days();
    let hours = duration.num_hours() % 24;
    let minutes = duration.num_minutes() % 60;
    if days > 0 {
        format!("{}d {}h {}min", days, hours, minutes)
    } else {
        format!("{}h {}min", hours, minutes)
    }
}
