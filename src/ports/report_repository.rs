//! Report repository port.
//!
//! `find_by_intervention` is the explicit "does this intervention have a
//! report?" query. Every caller handles the `None` case.

use crate::domain::foundation::{DomainError, InterventionId, ReportId};
use crate::domain::report::InterventionReport;
use async_trait::async_trait;

/// Repository port for InterventionReport persistence.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Save a new report.
    ///
    /// # Errors
    ///
    /// - `ReportAlreadyExists` if the intervention already has one
    /// - `DatabaseError` on persistence failure
    async fn save(&self, report: &InterventionReport) -> Result<(), DomainError>;

    /// Compare-and-swap update on `report.version()`.
    ///
    /// # Errors
    ///
    /// - `ReportNotFound` if the report doesn't exist
    /// - `ConcurrencyConflict` if the stored version differs
    async fn update(&self, report: &InterventionReport) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<InterventionReport>, DomainError>;

    /// The report of an intervention, if one was created.
    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Option<InterventionReport>, DomainError>;
}
