//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, roles, error types and the
//! capability checks that form the vocabulary of the field-service domain.

mod auth;
pub mod authorization;
mod errors;
mod ids;
mod intervention_status;
mod mission_status;
mod report_status;
mod state_machine;
mod timestamp;
mod versioned;
mod workflow_error;

pub use auth::{Actor, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AttachmentId, ClientId, DelayId, InterventionId, MissionId, NotificationId, ReportId, UserId,
};
pub use intervention_status::{InterventionOutcome, InterventionStatus};
pub use mission_status::MissionStatus;
pub use report_status::ReportStatus;
pub use state_machine::StateMachine;
pub use timestamp::{format_day_month_year, Timestamp};
pub(crate) use versioned::impl_versioned;
pub use versioned::Versioned;
pub use workflow_error::{WorkflowError, LOCKED_MESSAGE};
