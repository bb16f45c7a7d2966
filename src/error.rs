//! Error handling module
//!
//! Provides the governance core error taxonomy and the unified HTTP error type.

use crate::proposal::{ProposalId, ProposalStatus};
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by the proposal lifecycle.
///
/// Both kinds are recoverable by the caller: re-check the id, or re-query the
/// proposal state before retrying the operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("Proposal {0} not found")]
    NotFound(ProposalId),

    #[error("Cannot {operation} proposal {id} while it is {status}")]
    InvalidState {
        id: ProposalId,
        status: ProposalStatus,
        operation: &'static str,
    },
}

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            AppError::Governance(GovernanceError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            }
            AppError::Governance(e @ GovernanceError::InvalidState { .. }) => {
                warn!("Rejected lifecycle transition: {}", e);
                (StatusCode::CONFLICT, "INVALID_STATE", e.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::BadRequest(msg) => {
                debug!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            code: error_code.to_string(),
        });

        (status, body).into_response()
    }
}

// Extractor rejections share the JSON error envelope

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper function to create a validation error
pub fn validation_error(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::from(GovernanceError::NotFound(Uuid::new_v4()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_state_maps_to_409() {
        let err = AppError::from(GovernanceError::InvalidState {
            id: Uuid::new_v4(),
            status: ProposalStatus::Rejected,
            operation: "execute",
        });
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_state_message_names_operation_and_status() {
        let id = Uuid::new_v4();
        let err = GovernanceError::InvalidState {
            id,
            status: ProposalStatus::Executed,
            operation: "execute",
        };
        assert_eq!(
            err.to_string(),
            format!("Cannot execute proposal {} while it is executed", id)
        );
    }
}
