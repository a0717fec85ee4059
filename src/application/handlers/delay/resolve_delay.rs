//! ResolveDelayHandler - closes a delay episode.

use std::sync::Arc;

use crate::domain::delay::Delay;
use crate::domain::foundation::{Actor, DelayId, Versioned, WorkflowError};
use crate::domain::intervention::Intervention;
use crate::ports::{Clock, DelayRepository, InterventionRepository};

/// Command to resolve a delay.
#[derive(Debug, Clone)]
pub struct ResolveDelayCommand {
    pub actor: Actor,
    pub delay_id: DelayId,
}

/// Handler for delay resolution (responsible user or administrator).
///
/// Stores the episode's duration and marks the intervention's delay
/// resolved.
pub struct ResolveDelayHandler {
    delays: Arc<dyn DelayRepository>,
    interventions: Arc<dyn InterventionRepository>,
    clock: Arc<dyn Clock>,
}

impl ResolveDelayHandler {
    pub fn new(
        delays: Arc<dyn DelayRepository>,
        interventions: Arc<dyn InterventionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            delays,
            interventions,
            clock,
        }
    }

    pub async fn handle(&self, cmd: ResolveDelayCommand) -> Result<Delay, WorkflowError> {
        // 1. Load and resolve in memory
        let mut delay = self
            .delays
            .find_by_id(&cmd.delay_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Delay", cmd.delay_id))?;
        delay.resolve(&cmd.actor, self.clock.now())?;

        // 2. Reflect on the intervention while the episode is still open
        let before = self.interventions.find_by_id(delay.intervention_id()).await?;
        if let Some(before) = &before {
            let mut intervention = before.clone();
            intervention.mark_delay_resolved();
            self.interventions.update(&intervention).await?;
        }

        // 3. Close the episode, undoing step 2 if that fails
        if let Err(err) = self.delays.update(&delay).await {
            if let Some(before) = before {
                self.roll_back(before.next_version()).await;
            }
            return Err(err.into());
        }

        tracing::info!(
            delay_id = %delay.id(),
            duration_secs = delay.duration_secs().unwrap_or_default(),
            "delay resolved"
        );
        Ok(delay.next_version())
    }

    async fn roll_back(&self, restored: Intervention) {
        if let Err(err) = self.interventions.update(&restored).await {
            tracing::warn!(
                intervention_id = %restored.id(),
                error = %err,
                "could not restore intervention after failed delay resolution"
            );
        }
    }
}
