use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{compare_and_swap, insert_new};
use crate::domain::foundation::{DomainError, ErrorCode, InterventionId, UserId};
use crate::domain::intervention::Intervention;
use crate::ports::InterventionRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryInterventionRepository {
    interventions: Arc<RwLock<HashMap<InterventionId, Intervention>>>,
}

impl InMemoryInterventionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select<F>(&self, predicate: F) -> Vec<Intervention>
    where
        F: Fn(&Intervention) -> bool,
    {
        let rows = self.interventions.read().await;
        let mut found: Vec<Intervention> = rows.values().filter(|i| predicate(i)).cloned().collect();
        found.sort_by_key(|i| (i.scheduled_date(), *i.id()));
        found
    }
}

#[async_trait]
impl InterventionRepository for InMemoryInterventionRepository {
    async fn save(&self, intervention: &Intervention) -> Result<(), DomainError> {
        let mut rows = self.interventions.write().await;
        insert_new(&mut rows, *intervention.id(), intervention.clone())
    }

    async fn update(&self, intervention: &Intervention) -> Result<(), DomainError> {
        let mut rows = self.interventions.write().await;
        compare_and_swap(
            &mut rows,
            *intervention.id(),
            intervention,
            ErrorCode::InterventionNotFound,
        )
    }

    async fn delete(&self, id: &InterventionId) -> Result<(), DomainError> {
        match self.interventions.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(ErrorCode::InterventionNotFound, "Intervention not found")
                .with_detail("id", id.to_string())),
        }
    }

    async fn find_by_id(&self, id: &InterventionId) -> Result<Option<Intervention>, DomainError> {
        Ok(self.interventions.read().await.get(id).cloned())
    }

    async fn find_by_intervenant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Intervention>, DomainError> {
        Ok(self.select(|i| i.intervenant_id() == Some(user_id)).await)
    }

    async fn find_detection_candidates(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Intervention>, DomainError> {
        let mut found = self.select(|i| i.is_detection_candidate(today)).await;
        found.sort_by_key(|i| (i.due_date(), *i.id()));
        Ok(found)
    }

    async fn find_late_unresolved(&self) -> Result<Vec<Intervention>, DomainError> {
        Ok(self.select(|i| i.is_late() && !i.delay().resolved).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MissionId, Timestamp};
    use crate::domain::intervention::{NewIntervention, Priority};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn intervention(due: NaiveDate) -> Intervention {
        Intervention::new(
            InterventionId::new(),
            NewIntervention {
                mission_id: MissionId::new(),
                title: "Check".to_string(),
                intervenant_id: None,
                scheduled_date: due,
                due_date: due,
                priority: Priority::Normal,
                resources: String::new(),
            },
            UserId::new(),
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn update_bumps_version() {
        let repo = InMemoryInterventionRepository::new();
        let i = intervention(date(2024, 1, 1));
        repo.save(&i).await.unwrap();

        repo.update(&i).await.unwrap();

        let stored = repo.find_by_id(i.id()).await.unwrap().unwrap();
        assert_eq!(stored.version(), 1);
    }

    #[tokio::test]
    async fn stale_update_is_a_conflict() {
        let repo = InMemoryInterventionRepository::new();
        let i = intervention(date(2024, 1, 1));
        repo.save(&i).await.unwrap();
        repo.update(&i).await.unwrap();

        let err = repo.update(&i).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found() {
        let repo = InMemoryInterventionRepository::new();
        let err = repo.update(&intervention(date(2024, 1, 1))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InterventionNotFound);
    }

    #[tokio::test]
    async fn detection_candidates_apply_selection_predicate() {
        let repo = InMemoryInterventionRepository::new();
        let overdue = intervention(date(2024, 1, 1));
        let due_today = intervention(date(2024, 1, 5));
        let mut flagged = intervention(date(2023, 12, 1));
        flagged.flag_late(Timestamp::now());
        for i in [&overdue, &due_today, &flagged] {
            repo.save(i).await.unwrap();
        }

        let found = repo.find_detection_candidates(date(2024, 1, 5)).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), overdue.id());
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let repo = InMemoryInterventionRepository::new();
        let i = intervention(date(2024, 1, 1));
        repo.save(&i).await.unwrap();
        repo.delete(i.id()).await.unwrap();
        assert!(repo.find_by_id(i.id()).await.unwrap().is_none());
        assert!(repo.delete(i.id()).await.is_err());
    }
}
