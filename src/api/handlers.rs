//! HTTP request handlers for the leave API.
//!
//! Handlers translate between JSON and the workflow; every rule lives in the
//! workflow itself.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{EmployeeId, RequestId, SubmissionInput};
use crate::query::paginate;

use super::request::{BulkDecisionRequest, DecisionRequest, DeleteRequest, ListQuery};
use super::response::{
    ApiError, ApiErrorResponse, BulkDecisionResponse, DeleteResponse, ListResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/requests",
            get(list_requests)
                .post(submit_request)
                .delete(delete_requests),
        )
        .route("/requests/decisions", post(bulk_decide))
        .route("/requests/:id", get(get_request))
        .route("/requests/:id/decision", post(decide_request))
        .route("/employees", get(list_employees))
        .route("/employees/:id/leave", get(employee_leave))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn reject_json(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            ApiError::malformed_json(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn fail(correlation_id: Uuid, operation: &str, error: crate::error::LeaveError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        operation,
        code = error.code(),
        error = %error,
        "Operation failed"
    );
    ApiErrorResponse::from(error).into_response()
}

/// Handler for GET /requests.
async fn list_requests(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Query string rejected");
            return ApiErrorResponse::bad_request(ApiError::malformed_query(rejection.body_text()))
                .into_response();
        }
    };

    let filter = match query.to_filter() {
        Ok(filter) => filter,
        Err(err) => return fail(correlation_id, "list", err),
    };

    let listing = state.workflow().list_requests(&filter);
    let page = paginate(&listing.requests, query.page_size(), query.page());
    info!(
        correlation_id = %correlation_id,
        matched = page.total_items,
        page = page.page,
        "Listed leave requests"
    );

    json_response(
        StatusCode::OK,
        ListResponse {
            page,
            counts: listing.counts,
        },
    )
}

/// Handler for POST /requests.
async fn submit_request(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave submission");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return reject_json(correlation_id, rejection).into_response(),
    };

    match state.workflow().submit(&input) {
        Ok(request) => json_response(StatusCode::CREATED, request),
        Err(err) => fail(correlation_id, "submit", err),
    }
}

/// Handler for GET /requests/:id.
async fn get_request(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.workflow().get(&RequestId::new(id)) {
        Ok(request) => json_response(StatusCode::OK, request),
        Err(err) => fail(correlation_id, "get", err),
    }
}

/// Handler for POST /requests/:id/decision.
async fn decide_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, request_id = %id, "Processing decision");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return reject_json(correlation_id, rejection).into_response(),
    };

    match state
        .workflow()
        .decide(&RequestId::new(id), body.decision, body.notes.as_deref())
    {
        Ok(request) => json_response(StatusCode::OK, request),
        Err(err) => fail(correlation_id, "decide", err),
    }
}

/// Handler for POST /requests/decisions.
async fn bulk_decide(
    State(state): State<AppState>,
    payload: Result<Json<BulkDecisionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return reject_json(correlation_id, rejection).into_response(),
    };

    match state
        .workflow()
        .decide_many(&body.ids, body.decision, body.notes.as_deref())
    {
        Ok(outcome) => json_response(StatusCode::OK, BulkDecisionResponse::from(outcome)),
        Err(err) => fail(correlation_id, "bulk_decide", err),
    }
}

/// Handler for DELETE /requests.
async fn delete_requests(
    State(state): State<AppState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return reject_json(correlation_id, rejection).into_response(),
    };

    let outcome = state.workflow().delete(&body.ids);
    info!(
        correlation_id = %correlation_id,
        deleted = outcome.deleted_count,
        failed = outcome.errors.len(),
        "Processed delete"
    );
    json_response(StatusCode::OK, DeleteResponse::from(outcome))
}

/// Handler for GET /employees.
async fn list_employees(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.workflow().employees())
}

/// Handler for GET /employees/:id/leave.
async fn employee_leave(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Fetching employee leave");

    match state.workflow().employee_overview(&EmployeeId::new(id)) {
        Ok(view) => json_response(StatusCode::OK, view),
        Err(err) => fail(correlation_id, "employee_leave", err),
    }
}
