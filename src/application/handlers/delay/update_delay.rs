//! UpdateDelayHandler - edits an open delay.

use std::sync::Arc;

use crate::domain::delay::{Delay, DelayDetails};
use crate::domain::foundation::{Actor, DelayId, Versioned, WorkflowError};
use crate::ports::DelayRepository;

#[derive(Debug, Clone)]
pub struct UpdateDelayCommand {
    pub actor: Actor,
    pub delay_id: DelayId,
    pub details: DelayDetails,
}

pub struct UpdateDelayHandler {
    delays: Arc<dyn DelayRepository>,
}

impl UpdateDelayHandler {
    pub fn new(delays: Arc<dyn DelayRepository>) -> Self {
        Self { delays }
    }

    pub async fn handle(&self, cmd: UpdateDelayCommand) -> Result<Delay, WorkflowError> {
        let mut delay = self
            .delays
            .find_by_id(&cmd.delay_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Delay", cmd.delay_id))?;

        delay.update_details(&cmd.actor, cmd.details)?;
        self.delays.update(&delay).await?;

        Ok(delay.next_version())
    }
}
