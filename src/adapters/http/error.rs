//! Error responses shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::str::FromStr;

use crate::domain::foundation::WorkflowError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new("UNAUTHENTICATED", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Handler-level error: either a workflow failure or a malformed request.
#[derive(Debug)]
pub enum ApiError {
    Workflow(WorkflowError),
    BadRequest(String),
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        ApiError::Workflow(err)
    }
}

/// HTTP status for a workflow error.
pub fn status_for(err: &WorkflowError) -> StatusCode {
    match err {
        WorkflowError::Unauthorized(_) => StatusCode::FORBIDDEN,
        WorkflowError::InvalidTransition(_) => StatusCode::CONFLICT,
        WorkflowError::Validation { .. } => StatusCode::BAD_REQUEST,
        WorkflowError::Locked => StatusCode::LOCKED,
        WorkflowError::NotFound { .. } => StatusCode::NOT_FOUND,
        WorkflowError::Conflict(_) => StatusCode::CONFLICT,
        WorkflowError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
            }
            ApiError::Workflow(err) => {
                let status = status_for(&err);
                let body = match &err {
                    WorkflowError::Infrastructure(detail) => {
                        tracing::error!(error = %detail, "request failed on infrastructure");
                        ErrorResponse::new(err.code().to_string(), "Internal server error")
                    }
                    WorkflowError::Validation { field, .. } => {
                        ErrorResponse::new(err.code().to_string(), err.to_string())
                            .with_details(serde_json::json!({ "field": field }))
                    }
                    _ => ErrorResponse::new(err.code().to_string(), err.to_string()),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Parses a path identifier, naming the resource on failure.
pub fn parse_id<T: FromStr>(raw: &str, resource: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {} ID", resource)))
}
