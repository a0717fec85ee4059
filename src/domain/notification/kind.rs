//! NotificationKind enum - the fixed set of event tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Event that produced a notification (`type_notification`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Detection flagged the recipient's intervention.
    RetardAutomatique,
    /// Detection flagged an intervention (administrator copy).
    RetardAutomatiqueAdmin,
    MissionAssignment,
    InterventionAssignment,
    RapportValide,
    RapportRejete,
    NouveauRapportIntervention,
    CompteRenduIntervention,
    /// A user reported a delay by hand.
    Retard,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 9] = [
        NotificationKind::RetardAutomatique,
        NotificationKind::RetardAutomatiqueAdmin,
        NotificationKind::MissionAssignment,
        NotificationKind::InterventionAssignment,
        NotificationKind::RapportValide,
        NotificationKind::RapportRejete,
        NotificationKind::NouveauRapportIntervention,
        NotificationKind::CompteRenduIntervention,
        NotificationKind::Retard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::RetardAutomatique => "retard_automatique",
            NotificationKind::RetardAutomatiqueAdmin => "retard_automatique_admin",
            NotificationKind::MissionAssignment => "mission_assignment",
            NotificationKind::InterventionAssignment => "intervention_assignment",
            NotificationKind::RapportValide => "rapport_valide",
            NotificationKind::RapportRejete => "rapport_rejete",
            NotificationKind::NouveauRapportIntervention => "nouveau_rapport_intervention",
            NotificationKind::CompteRenduIntervention => "compte_rendu_intervention",
            NotificationKind::Retard => "retard",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "notification_kind",
                    format!("unknown notification type '{}'", s),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_tag_matches_as_str() {
        for kind in NotificationKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn parses_every_tag() {
        for kind in NotificationKind::ALL {
            assert_eq!(kind.as_str().parse::<NotificationKind>().unwrap(), kind);
        }
        assert!("unknown".parse::<NotificationKind>().is_err());
    }
}
