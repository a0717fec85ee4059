//! Per-record detection step.
//!
//! For one candidate:
//! 1. flag the intervention late and persist it (compare-and-swap)
//! 2. record an automatic `fin` delay, the intervenant being responsible
//! 3. notify the intervenant (`retard_automatique`)
//! 4. notify every administrator (`retard_automatique_admin`)
//!
//! If step 2 fails the flag is rolled back, so the next run picks the
//! intervention up again. A failed notification leaves flag and delay in
//! place and reports the record as failed.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::NotificationDispatcher;
use crate::domain::delay::Delay;
use crate::domain::foundation::{DelayId, Versioned, WorkflowError};
use crate::domain::intervention::Intervention;
use crate::domain::notification::{messages, NotificationKind};
use crate::ports::{Clock, DelayRepository, InterventionRepository, UserRepository};

/// Fixed texts written on automatic delays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayDefaults {
    pub impact: String,
    pub corrective_actions: String,
}

impl Default for DelayDefaults {
    fn default() -> Self {
        Self {
            impact: "Impact on the schedule and on client satisfaction".to_string(),
            corrective_actions: "Contact the technician to reschedule".to_string(),
        }
    }
}

/// Flags a single overdue intervention with all its side effects.
#[derive(Clone)]
pub struct DelayFlagger {
    interventions: Arc<dyn InterventionRepository>,
    delays: Arc<dyn DelayRepository>,
    users: Arc<dyn UserRepository>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
    defaults: DelayDefaults,
}

impl DelayFlagger {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        delays: Arc<dyn DelayRepository>,
        users: Arc<dyn UserRepository>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
        defaults: DelayDefaults,
    ) -> Self {
        Self {
            interventions,
            delays,
            users,
            dispatcher,
            clock,
            defaults,
        }
    }

    /// Flags `intervention` if it is a detection candidate for `today`.
    ///
    /// Returns the intervention as stored after flagging, or `None` if it
    /// was not a candidate.
    pub async fn flag(
        &self,
        mut intervention: Intervention,
        today: NaiveDate,
    ) -> Result<Option<Intervention>, WorkflowError> {
        if !intervention.is_detection_candidate(today) {
            return Ok(None);
        }

        let now = self.clock.now();
        intervention.flag_late(now);
        self.interventions.update(&intervention).await?;
        let mut stored = intervention.next_version();

        let delay = Delay::new_automatic(
            DelayId::new(),
            &stored,
            self.defaults.impact.clone(),
            self.defaults.corrective_actions.clone(),
            now,
        );
        if let Err(err) = self.delays.save(&delay).await {
            self.roll_back(&mut stored).await;
            return Err(err.into());
        }

        self.notify(&stored).await?;

        tracing::debug!(
            intervention_id = %stored.id(),
            delay_id = %delay.id(),
            "intervention flagged late"
        );
        Ok(Some(stored))
    }

    async fn notify(&self, intervention: &Intervention) -> Result<(), WorkflowError> {
        let mut intervenant_name = None;
        if let Some(intervenant_id) = intervention.intervenant_id() {
            self.dispatcher
                .notify(
                    intervenant_id,
                    NotificationKind::RetardAutomatique,
                    messages::late_for_intervenant(intervention.title(), intervention.due_date()),
                )
                .await?;
            intervenant_name = self
                .users
                .find_by_id(intervenant_id)
                .await?
                .map(|user| user.display_name());
        }

        let message = messages::late_for_admin(
            intervention.title(),
            intervention.due_date(),
            intervenant_name.as_deref(),
        );
        self.dispatcher
            .notify_admins(NotificationKind::RetardAutomatiqueAdmin, &message, None)
            .await?;
        Ok(())
    }

    async fn roll_back(&self, stored: &mut Intervention) {
        stored.clear_late_flag();
        if let Err(err) = self.interventions.update(stored).await {
            tracing::warn!(
                intervention_id = %stored.id(),
                error = %err,
                "could not roll back late flag; re-run detection after fixing the store"
            );
        }
    }
}
