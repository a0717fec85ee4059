//! Delay queries: list and detail.
//!
//! Administrators see every delay; everyone else sees the delays they are
//! responsible for.

use chrono::Duration;
use std::sync::Arc;

use crate::domain::delay::Delay;
use crate::domain::foundation::authorization::require_admin_or_owner;
use crate::domain::foundation::{Actor, DelayId, WorkflowError};
use crate::ports::{Clock, DelayRepository};

/// A delay with its duration evaluated at query time.
#[derive(Debug, Clone)]
pub struct DelayView {
    pub delay: Delay,
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct ListDelaysQuery {
    pub actor: Actor,
}

#[derive(Debug, Clone)]
pub struct GetDelayQuery {
    pub actor: Actor,
    pub delay_id: DelayId,
}

pub struct ListDelaysHandler {
    delays: Arc<dyn DelayRepository>,
    clock: Arc<dyn Clock>,
}

impl ListDelaysHandler {
    pub fn new(delays: Arc<dyn DelayRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { delays, clock }
    }

    /// Newest first.
    pub async fn handle(&self, query: ListDelaysQuery) -> Result<Vec<DelayView>, WorkflowError> {
        let delays = if query.actor.is_admin() {
            self.delays.find_all().await?
        } else {
            self.delays.find_by_responsible(&query.actor.user_id).await?
        };

        let now = self.clock.now();
        Ok(delays
            .into_iter()
            .map(|delay| DelayView {
                duration: delay.duration_at(now),
                delay,
            })
            .collect())
    }
}

pub struct GetDelayHandler {
    delays: Arc<dyn DelayRepository>,
    clock: Arc<dyn Clock>,
}

impl GetDelayHandler {
    pub fn new(delays: Arc<dyn DelayRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { delays, clock }
    }

    pub async fn handle(&self, query: GetDelayQuery) -> Result<DelayView, WorkflowError> {
        let delay = self
            .delays
            .find_by_id(&query.delay_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Delay", query.delay_id))?;
        require_admin_or_owner(&query.actor, delay.responsible_id(), "delay.view")?;

        Ok(DelayView {
            duration: delay.duration_at(self.clock.now()),
            delay,
        })
    }
}
