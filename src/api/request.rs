//! Request types for the leave API.

use serde::{Deserialize, Serialize};

use crate::error::LeaveResult;
use crate::models::{Decision, LeaveStatus, RequestId};
use crate::query::RequestFilter;

/// Page size used when the caller gives none.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Largest page size a caller may ask for.
pub const MAX_PAGE_SIZE: usize = 100;

/// Query string of `GET /requests`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// Employee name substring.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact leave type.
    #[serde(default)]
    pub leave_type: Option<String>,
    /// Status label; blank or `all` means any status.
    #[serde(default)]
    pub status: Option<String>,
    /// 1-indexed page.
    #[serde(default)]
    pub page: Option<usize>,
    /// Items per page.
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl ListQuery {
    /// Converts the query into a filter, rejecting unknown status labels.
    pub fn to_filter(&self) -> LeaveResult<RequestFilter> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) if label.eq_ignore_ascii_case("all") => None,
            Some(label) => Some(label.parse::<LeaveStatus>()?),
        };
        Ok(RequestFilter {
            search: self.search.clone(),
            leave_type: self.leave_type.clone(),
            status,
        })
    }

    /// The requested page, defaulting to the first.
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// The requested page size, defaulted and capped.
    pub fn page_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// Body of `POST /requests/:id/decision`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Approve or reject.
    pub decision: Decision,
    /// Administrator notes; required for rejections.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /requests/decisions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDecisionRequest {
    /// Target requests.
    pub ids: Vec<RequestId>,
    /// Approve or reject.
    pub decision: Decision,
    /// Administrator notes; required for rejections.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `DELETE /requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Requests to delete.
    pub ids: Vec<RequestId>,
}
