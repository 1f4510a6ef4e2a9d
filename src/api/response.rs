//! Response types for the leave API.
//!
//! This module defines the success bodies, the error body and the mapping
//! from [`LeaveError`] to HTTP status codes.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::LeaveError;
use crate::models::{LeaveRequest, RequestId};
use crate::query::{Page, StatusCounts};
use crate::workflow::{BulkFailure, BulkOutcome, DeleteOutcome};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a malformed query string error response.
    pub fn malformed_query(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_QUERY", message)
    }
}

impl From<&LeaveError> for ApiError {
    fn from(error: &LeaveError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

/// HTTP status for each error kind.
pub fn status_for(error: &LeaveError) -> StatusCode {
    match error {
        LeaveError::Validation { .. } => StatusCode::BAD_REQUEST,
        LeaveError::NotFound { .. } => StatusCode::NOT_FOUND,
        LeaveError::InvalidState { .. } => StatusCode::CONFLICT,
        LeaveError::InsufficientBalance { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        LeaveError::LedgerInconsistency { .. }
        | LeaveError::ConfigNotFound { .. }
        | LeaveError::ConfigParseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<LeaveError> for ApiErrorResponse {
    fn from(error: LeaveError) -> Self {
        let status = status_for(&error);
        let body = match &error {
            LeaveError::InsufficientBalance { .. } => ApiError::with_details(
                error.code(),
                error.to_string(),
                "The request stays pending; adjust the range or the allotment and retry",
            ),
            LeaveError::InvalidState { .. } => ApiError::with_details(
                error.code(),
                error.to_string(),
                "The request was already decided; refresh and retry",
            ),
            _ => ApiError::from(&error),
        };
        ApiErrorResponse {
            status,
            error: body,
        }
    }
}

/// Body of `GET /requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    /// The requested page of matching requests.
    pub page: Page<LeaveRequest>,
    /// Status tallies across all requests.
    pub counts: StatusCounts,
}

/// One failed id in a bulk response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkItemError {
    /// The id that failed.
    pub id: RequestId,
    /// Error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl From<BulkFailure> for BulkItemError {
    fn from(failure: BulkFailure) -> Self {
        Self {
            code: failure.error.code().to_string(),
            message: failure.error.to_string(),
            id: failure.id,
        }
    }
}

/// Body of `DELETE /requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Number of requests removed.
    pub deleted_count: usize,
    /// Ids removed.
    pub deleted: Vec<RequestId>,
    /// Per-id failures.
    pub errors: Vec<BulkItemError>,
}

impl From<DeleteOutcome> for DeleteResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            deleted_count: outcome.deleted_count,
            deleted: outcome.deleted,
            errors: outcome.errors.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of `POST /requests/decisions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDecisionResponse {
    /// Requests that transitioned.
    pub updated: Vec<LeaveRequest>,
    /// Per-id failures.
    pub errors: Vec<BulkItemError>,
}

impl From<BulkOutcome> for BulkDecisionResponse {
    fn from(outcome: BulkOutcome) -> Self {
        Self {
            updated: outcome.updated,
            errors: outcome.errors.into_iter().map(Into::into).collect(),
        }
    }
}
