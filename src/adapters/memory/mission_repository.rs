use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{compare_and_swap, insert_new};
use crate::domain::foundation::{DomainError, ErrorCode, MissionId};
use crate::domain::mission::Mission;
use crate::ports::MissionRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryMissionRepository {
    missions: Arc<RwLock<HashMap<MissionId, Mission>>>,
}

impl InMemoryMissionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MissionRepository for InMemoryMissionRepository {
    async fn save(&self, mission: &Mission) -> Result<(), DomainError> {
        let mut missions = self.missions.write().await;
        insert_new(&mut missions, *mission.id(), mission.clone())
    }

    async fn update(&self, mission: &Mission) -> Result<(), DomainError> {
        let mut missions = self.missions.write().await;
        compare_and_swap(&mut missions, *mission.id(), mission, ErrorCode::MissionNotFound)
    }

    async fn find_by_id(&self, id: &MissionId) -> Result<Option<Mission>, DomainError> {
        Ok(self.missions.read().await.get(id).cloned())
    }
}
