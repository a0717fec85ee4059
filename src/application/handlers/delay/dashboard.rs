//! DelayDashboardHandler - delay counters and latest episodes.

use std::sync::Arc;

use crate::domain::delay::Delay;
use crate::domain::foundation::{Actor, WorkflowError};
use crate::ports::{DelayRepository, InterventionRepository};

/// Number of recent delays shown on the dashboard.
pub const RECENT_DELAYS: usize = 5;

#[derive(Debug, Clone)]
pub struct DelayDashboardQuery {
    pub actor: Actor,
}

#[derive(Debug, Clone, Default)]
pub struct DelayDashboard {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
    /// Interventions currently late with the delay not resolved.
    pub late_interventions: usize,
    pub recent: Vec<Delay>,
}

/// Scoped like the delay list: administrators see the whole organisation,
/// other users their own delays and interventions.
pub struct DelayDashboardHandler {
    delays: Arc<dyn DelayRepository>,
    interventions: Arc<dyn InterventionRepository>,
}

impl DelayDashboardHandler {
    pub fn new(
        delays: Arc<dyn DelayRepository>,
        interventions: Arc<dyn InterventionRepository>,
    ) -> Self {
        Self {
            delays,
            interventions,
        }
    }

    pub async fn handle(&self, query: DelayDashboardQuery) -> Result<DelayDashboard, WorkflowError> {
        let actor = &query.actor;
        let (delays, late_interventions) = if actor.is_admin() {
            (
                self.delays.find_all().await?,
                self.interventions.find_late_unresolved().await?.len(),
            )
        } else {
            let late = self
                .interventions
                .find_by_intervenant(&actor.user_id)
                .await?
                .iter()
                .filter(|i| i.is_late() && !i.delay().resolved)
                .count();
            (self.delays.find_by_responsible(&actor.user_id).await?, late)
        };

        let resolved = delays.iter().filter(|d| d.is_resolved()).count();
        Ok(DelayDashboard {
            total: delays.len(),
            open: delays.len() - resolved,
            resolved,
            late_interventions,
            recent: delays.into_iter().take(RECENT_DELAYS).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{date, TestWorld};
    use crate::domain::foundation::{DelayId, Role};

    #[tokio::test]
    async fn counts_and_caps_recent_list() {
        let world = TestWorld::new();
        let admin = world.user("admin", Role::Administrator).await;
        let tech = world.user("tech", Role::Employee).await;
        let mission = world.mission(None).await;

        for n in 0..7 {
            let mut intervention = world
                .intervention(mission.id(), Some(tech.user_id), date(2024, 1, 1))
                .await;
            intervention.flag_late(world.now());
            world.interventions.update(&intervention).await.unwrap();

            let mut delay = Delay::new_automatic(
                DelayId::new(),
                &intervention,
                String::new(),
                String::new(),
                world.now().plus_secs(n),
            );
            if n < 2 {
                delay.resolve(&admin, world.now().plus_secs(100)).unwrap();
            }
            world.delays.save(&delay).await.unwrap();
        }

        let handler = DelayDashboardHandler::new(world.delays.clone(), world.interventions.clone());
        let dashboard = handler.handle(DelayDashboardQuery { actor: admin }).await.unwrap();

        assert_eq!(dashboard.total, 7);
        assert_eq!(dashboard.resolved, 2);
        assert_eq!(dashboard.open, 5);
        assert_eq!(dashboard.late_interventions, 7);
        assert_eq!(dashboard.recent.len(), RECENT_DELAYS);

        let own = handler.handle(DelayDashboardQuery { actor: tech }).await.unwrap();
        assert_eq!(own.total, 7);
        assert_eq!(own.late_interventions, 7);
    }
}
