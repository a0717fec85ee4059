//! Error taxonomy returned by every command and query handler.
//!
//! Ports speak `DomainError` (a code plus a message). Handlers surface the
//! smaller, user-facing `WorkflowError` set; the conversion below is the
//! single place where codes are mapped onto it.

use thiserror::Error;

use super::{DomainError, ErrorCode};

/// Message shown when a mutation hits an intervention whose report is validated.
pub const LOCKED_MESSAGE: &str = "intervention is locked: its report has been validated";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Actor lacks the role or ownership required for the action.
    #[error("Permission denied: {0}")]
    Unauthorized(String),

    /// State machine precondition violated.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// A required field is missing or malformed.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Mutation blocked by a validated report.
    #[error("{}", LOCKED_MESSAGE)]
    Locked,

    /// Referenced record is absent.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// The record changed between read and write.
    #[error("Concurrent update: {0}")]
    Conflict(String),

    /// Record store or notification failure.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl WorkflowError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        WorkflowError::Unauthorized(message.into())
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        WorkflowError::InvalidTransition(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        WorkflowError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        WorkflowError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Machine-readable code, used by the HTTP adapter.
    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::Unauthorized(_) => ErrorCode::Unauthorized,
            WorkflowError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            WorkflowError::Validation { .. } => ErrorCode::ValidationFailed,
            WorkflowError::Locked => ErrorCode::InterventionLocked,
            WorkflowError::NotFound { resource, .. } => match *resource {
                "User" => ErrorCode::UserNotFound,
                "Mission" => ErrorCode::MissionNotFound,
                "Intervention" => ErrorCode::InterventionNotFound,
                "Delay" => ErrorCode::DelayNotFound,
                "Report" => ErrorCode::ReportNotFound,
                "Notification" => ErrorCode::NotificationNotFound,
                "Attachment" => ErrorCode::AttachmentNotFound,
                _ => ErrorCode::InternalError,
            },
            WorkflowError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            WorkflowError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

fn resource_for(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::UserNotFound => "User",
        ErrorCode::MissionNotFound => "Mission",
        ErrorCode::InterventionNotFound => "Intervention",
        ErrorCode::DelayNotFound => "Delay",
        ErrorCode::ReportNotFound => "Report",
        ErrorCode::NotificationNotFound => "Notification",
        ErrorCode::AttachmentNotFound => "Attachment",
        _ => "Record",
    }
}

impl From<DomainError> for WorkflowError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Unauthorized => WorkflowError::Unauthorized(err.message),
            ErrorCode::InvalidStateTransition | ErrorCode::ReportAlreadyExists => {
                WorkflowError::InvalidTransition(err.message)
            }
            ErrorCode::ValidationFailed => WorkflowError::Validation {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::InterventionLocked => WorkflowError::Locked,
            code if code.is_not_found() => WorkflowError::NotFound {
                resource: resource_for(code),
                id: err.detail("id").unwrap_or_default().to_string(),
            },
            ErrorCode::ConcurrencyConflict => WorkflowError::Conflict(err.message),
            _ => WorkflowError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_code_maps_to_unauthorized() {
        let err: WorkflowError = DomainError::new(ErrorCode::Unauthorized, "nope").into();
        assert_eq!(err, WorkflowError::Unauthorized("nope".to_string()));
    }

    #[test]
    fn validation_keeps_field_name() {
        let err: WorkflowError = DomainError::validation("reason", "required").into();
        assert_eq!(err, WorkflowError::validation("reason", "required"));
    }

    #[test]
    fn not_found_keeps_resource_and_id() {
        let err: WorkflowError = DomainError::new(ErrorCode::DelayNotFound, "missing")
            .with_detail("id", "abc")
            .into();
        assert_eq!(err, WorkflowError::not_found("Delay", "abc"));
        assert_eq!(err.code(), ErrorCode::DelayNotFound);
    }

    #[test]
    fn locked_renders_user_visible_message() {
        let err: WorkflowError = DomainError::new(ErrorCode::InterventionLocked, "x").into();
        assert_eq!(err.to_string(), LOCKED_MESSAGE);
    }

    #[test]
    fn database_errors_become_infrastructure() {
        let err: WorkflowError = DomainError::database("connection reset").into();
        assert!(matches!(err, WorkflowError::Infrastructure(_)));
    }

    #[test]
    fn conflict_maps_to_conflict() {
        let err: WorkflowError =
            DomainError::new(ErrorCode::ConcurrencyConflict, "stale version").into();
        assert_eq!(err.code(), ErrorCode::ConcurrencyConflict);
    }
}
