//! Report module - the validation-gated intervention report.
//!
//! One report per intervention. The intervenant drafts and submits it;
//! an administrator validates or rejects it. A validated report is final
//! and locks its intervention (see `intervention::is_locked`).

mod aggregate;

pub use aggregate::{InterventionReport, ReportContent};
