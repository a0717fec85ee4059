use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{compare_and_swap, insert_new};
use crate::domain::delay::Delay;
use crate::domain::foundation::{DelayId, DomainError, ErrorCode, InterventionId, UserId};
use crate::ports::DelayRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryDelayRepository {
    delays: Arc<RwLock<HashMap<DelayId, Delay>>>,
}

impl InMemoryDelayRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first.
    async fn select<F>(&self, predicate: F) -> Vec<Delay>
    where
        F: Fn(&Delay) -> bool,
    {
        let rows = self.delays.read().await;
        let mut found: Vec<Delay> = rows.values().filter(|d| predicate(d)).cloned().collect();
        found.sort_by(|a, b| b.created_at().cmp(a.created_at()).then(b.id().cmp(a.id())));
        found
    }
}

#[async_trait]
impl DelayRepository for InMemoryDelayRepository {
    async fn save(&self, delay: &Delay) -> Result<(), DomainError> {
        let mut rows = self.delays.write().await;
        insert_new(&mut rows, *delay.id(), delay.clone())
    }

    async fn update(&self, delay: &Delay) -> Result<(), DomainError> {
        let mut rows = self.delays.write().await;
        compare_and_swap(&mut rows, *delay.id(), delay, ErrorCode::DelayNotFound)
    }

    async fn find_by_id(&self, id: &DelayId) -> Result<Option<Delay>, DomainError> {
        Ok(self.delays.read().await.get(id).cloned())
    }

    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Vec<Delay>, DomainError> {
        Ok(self.select(|d| d.intervention_id() == intervention_id).await)
    }

    async fn find_by_responsible(&self, user_id: &UserId) -> Result<Vec<Delay>, DomainError> {
        Ok(self.select(|d| d.responsible_id() == Some(user_id)).await)
    }

    async fn find_all(&self) -> Result<Vec<Delay>, DomainError> {
        Ok(self.select(|_| true).await)
    }
}
