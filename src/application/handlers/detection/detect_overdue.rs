//! DetectOverdueInterventionsHandler - the detection pass.

use chrono::NaiveDate;
use std::sync::Arc;

use super::DelayFlagger;
use crate::domain::foundation::authorization::require_admin;
use crate::domain::foundation::{Actor, WorkflowError};
use crate::domain::intervention::Intervention;
use crate::ports::{Clock, InterventionRepository};

/// Administrator action: run detection for today.
#[derive(Debug, Clone)]
pub struct RunDelayDetectionCommand {
    pub actor: Actor,
}

/// Administrator query: what would detection flag today.
#[derive(Debug, Clone)]
pub struct PreviewDelayDetectionCommand {
    pub actor: Actor,
}

/// Outcome of a detection pass.
#[derive(Debug, Clone)]
pub struct DetectionRunResult {
    pub today: NaiveDate,
    /// Interventions transitioned by this pass.
    pub flagged: Vec<Intervention>,
}

impl DetectionRunResult {
    pub fn count(&self) -> usize {
        self.flagged.len()
    }
}

/// Scans for overdue interventions and flags them.
///
/// Running twice for the same day flags nothing the second time: flagged
/// interventions no longer match the selection predicate.
pub struct DetectOverdueInterventionsHandler {
    interventions: Arc<dyn InterventionRepository>,
    flagger: DelayFlagger,
    clock: Arc<dyn Clock>,
}

impl DetectOverdueInterventionsHandler {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        flagger: DelayFlagger,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            interventions,
            flagger,
            clock,
        }
    }

    /// Flags every candidate for `today`.
    ///
    /// A failure on one intervention is logged and excluded from the
    /// result; the pass continues with the others. Only a failure to list
    /// candidates aborts the pass.
    pub async fn detect_and_flag(&self, today: NaiveDate) -> Result<Vec<Intervention>, WorkflowError> {
        let candidates = self.interventions.find_detection_candidates(today).await?;
        let total = candidates.len();

        let mut flagged = Vec::new();
        let mut failed = 0usize;
        for candidate in candidates {
            let intervention_id = *candidate.id();
            match self.flagger.flag(candidate, today).await {
                Ok(Some(intervention)) => flagged.push(intervention),
                Ok(None) => {}
                Err(err) => {
                    failed += 1;
                    tracing::warn!(
                        intervention_id = %intervention_id,
                        error = %err,
                        "failed to flag overdue intervention"
                    );
                }
            }
        }

        tracing::info!(
            %today,
            candidates = total,
            flagged = flagged.len(),
            failed,
            "delay detection pass complete"
        );
        Ok(flagged)
    }

    /// Administrator-triggered pass for the clock's current day.
    pub async fn handle(
        &self,
        cmd: RunDelayDetectionCommand,
    ) -> Result<DetectionRunResult, WorkflowError> {
        require_admin(&cmd.actor, "delay.detect")?;
        let today = self.clock.today();
        let flagged = self.detect_and_flag(today).await?;
        Ok(DetectionRunResult { today, flagged })
    }

    /// Lists today's candidates without flagging them.
    pub async fn preview(
        &self,
        cmd: PreviewDelayDetectionCommand,
    ) -> Result<Vec<Intervention>, WorkflowError> {
        require_admin(&cmd.actor, "delay.preview")?;
        Ok(self
            .interventions
            .find_detection_candidates(self.clock.today())
            .await?)
    }
}
