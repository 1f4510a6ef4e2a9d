//! HTTP API module for the leave engine.
//!
//! A thin axum adapter exposing submission, decisions, deletion and the
//! read views of [`crate::workflow::LeaveWorkflow`].

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BulkDecisionRequest, DecisionRequest, DeleteRequest, ListQuery, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
pub use response::{
    status_for, ApiError, ApiErrorResponse, BulkDecisionResponse, BulkItemError, DeleteResponse,
    ListResponse,
};
pub use state::AppState;
