use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::compare_and_swap;
use crate::domain::foundation::{DomainError, ErrorCode, InterventionId, ReportId};
use crate::domain::report::InterventionReport;
use crate::ports::ReportRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryReportRepository {
    reports: Arc<RwLock<HashMap<ReportId, InterventionReport>>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn save(&self, report: &InterventionReport) -> Result<(), DomainError> {
        let mut rows = self.reports.write().await;
        if rows
            .values()
            .any(|r| r.intervention_id() == report.intervention_id())
        {
            return Err(DomainError::new(
                ErrorCode::ReportAlreadyExists,
                "Intervention already has a report",
            )
            .with_detail("intervention_id", report.intervention_id().to_string()));
        }
        rows.insert(*report.id(), report.clone());
        Ok(())
    }

    async fn update(&self, report: &InterventionReport) -> Result<(), DomainError> {
        let mut rows = self.reports.write().await;
        compare_and_swap(&mut rows, *report.id(), report, ErrorCode::ReportNotFound)
    }

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<InterventionReport>, DomainError> {
        Ok(self.reports.read().await.get(id).cloned())
    }

    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Option<InterventionReport>, DomainError> {
        let rows = self.reports.read().await;
        Ok(rows
            .values()
            .find(|r| r.intervention_id() == intervention_id)
            .cloned())
    }
}
