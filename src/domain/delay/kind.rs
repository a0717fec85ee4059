//! DelayKind enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Category of a delay episode (`type_retard`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelayKind {
    /// Late start.
    #[serde(rename = "debut")]
    Start,
    /// Missed end or due date. Used by automatic detection.
    #[serde(rename = "fin")]
    End,
    /// Took longer than planned.
    #[serde(rename = "duree")]
    Overrun,
    #[serde(rename = "planification")]
    Planning,
    #[serde(rename = "technique")]
    Technical,
    #[serde(rename = "client")]
    Client,
    #[serde(rename = "autre")]
    Other,
}

impl DelayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DelayKind::Start => "debut",
            DelayKind::End => "fin",
            DelayKind::Overrun => "duree",
            DelayKind::Planning => "planification",
            DelayKind::Technical => "technique",
            DelayKind::Client => "client",
            DelayKind::Other => "autre",
        }
    }
}

impl fmt::Display for DelayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DelayKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debut" => Ok(DelayKind::Start),
            "fin" => Ok(DelayKind::End),
            "duree" => Ok(DelayKind::Overrun),
            "planification" => Ok(DelayKind::Planning),
            "technique" => Ok(DelayKind::Technical),
            "client" => Ok(DelayKind::Client),
            "autre" => Ok(DelayKind::Other),
            other => Err(ValidationError::invalid_format(
                "delay_kind",
                format!("unknown delay type '{}'", other),
            )),
        }
    }
}
