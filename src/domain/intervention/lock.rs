//! Report lock predicate.
//!
//! A validated report freezes its intervention: no edit, no delete and no
//! attachment change is accepted afterwards, whoever asks. Callers look the
//! report up explicitly (`ReportRepository::find_by_intervention`) and pass
//! the result here; `None` means the intervention has no report yet.

use crate::domain::foundation::{DomainError, ErrorCode, ReportStatus, LOCKED_MESSAGE};
use crate::domain::report::InterventionReport;

/// True if the intervention's report exists and is validated.
pub fn is_locked(report: Option<&InterventionReport>) -> bool {
    report.map_or(false, |r| r.status() == ReportStatus::Validated)
}

/// Fails with `InterventionLocked` if the report is validated.
pub fn ensure_unlocked(report: Option<&InterventionReport>) -> Result<(), DomainError> {
    if is_locked(report) {
        let mut err = DomainError::new(ErrorCode::InterventionLocked, LOCKED_MESSAGE);
        if let Some(report) = report {
            err = err.with_detail("intervention_id", report.intervention_id().to_string());
        }
        return Err(err);
    }
    Ok(())
}
