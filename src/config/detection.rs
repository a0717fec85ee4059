//! Delay detection configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::DelayDefaults;

/// Texts written into automatically created delays.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    #[serde(default = "default_impact")]
    pub default_impact: String,

    #[serde(default = "default_corrective_actions")]
    pub default_corrective_actions: String,
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_impact.trim().is_empty() {
            return Err(ValidationError::EmptyDelayText("default_impact"));
        }
        if self.default_corrective_actions.trim().is_empty() {
            return Err(ValidationError::EmptyDelayText("default_corrective_actions"));
        }
        Ok(())
    }

    pub fn delay_defaults(&self) -> DelayDefaults {
        DelayDefaults {
            impact: self.default_impact.clone(),
            corrective_actions: self.default_corrective_actions.clone(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            default_impact: default_impact(),
            default_corrective_actions: default_corrective_actions(),
        }
    }
}

fn default_impact() -> String {
    DelayDefaults::default().impact
}

fn default_corrective_actions() -> String {
    DelayDefaults::default().corrective_actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let config = DetectionConfig::default();
        assert_eq!(config.delay_defaults(), DelayDefaults::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_text_is_rejected() {
        let config = DetectionConfig {
            default_impact: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyDelayText("default_impact"))
        );
    }
}
