//! Report command and query handlers.
//!
//! Report lifecycle: `brouillon -> soumis -> valide | rejete`, with
//! `rejete -> soumis` on resubmission. A validated report is final and
//! locks its intervention.

mod context;
mod create_report;
mod get_report;
mod reject_report;
mod submit_report;
mod update_report;
mod validate_report;

pub use create_report::{CreateReportCommand, CreateReportHandler};
pub use get_report::{GetReportHandler, GetReportQuery};
pub use reject_report::{RejectReportCommand, RejectReportHandler};
pub use submit_report::{SubmitReportCommand, SubmitReportHandler};
pub use update_report::{UpdateReportCommand, UpdateReportHandler};
pub use validate_report::{ValidateReportCommand, ValidateReportHandler};
