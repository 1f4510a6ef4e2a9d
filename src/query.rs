//! Read-only views over a request collection: filtering, pagination,
//! aggregate counts and bulk selection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{LeaveRequest, LeaveStatus, RequestId};

/// Criteria for narrowing a request list. Empty criteria pass everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilter {
    /// Case-insensitive substring of the employee name.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact leave type.
    #[serde(default)]
    pub leave_type: Option<String>,
    /// Exact status.
    #[serde(default)]
    pub status: Option<LeaveStatus>,
}

impl RequestFilter {
    /// Sets the name search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the leave type.
    pub fn with_leave_type(mut self, leave_type: impl Into<String>) -> Self {
        self.leave_type = Some(leave_type.into());
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: LeaveStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if `request` satisfies every provided criterion.
    pub fn matches(&self, request: &LeaveRequest) -> bool {
        let search_ok = match non_blank(self.search.as_deref()) {
            Some(needle) => request
                .employee_name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        };
        let type_ok = match non_blank(self.leave_type.as_deref()) {
            Some(leave_type) => request.leave_type.as_str() == leave_type,
            None => true,
        };
        let status_ok = self.status.is_none_or(|status| request.status == status);

        search_ok && type_ok && status_ok
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Keeps the requests matching `filter`, preserving their relative order.
pub fn filter(requests: &[LeaveRequest], filter: &RequestFilter) -> Vec<LeaveRequest> {
    requests
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// One page of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page; empty past the last page.
    pub items: Vec<T>,
    /// 1-indexed page number.
    pub page: usize,
    /// Maximum items per page.
    pub page_size: usize,
    /// Items across all pages.
    pub total_items: usize,
    /// `ceil(total_items / page_size)`; zero for an empty sequence.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Page count for display: an empty sequence still shows one empty page.
    pub fn display_total_pages(&self) -> usize {
        self.total_pages.max(1)
    }

    /// Returns true if a later page has items.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slices out page `page_number` (1-indexed) of `items`.
///
/// A page number past the end yields an empty page rather than an error.
/// A zero page size or page number is treated as one.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page_number: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = page_number.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let page_items = if start >= total_items {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(total_items);
        items[start..end].to_vec()
    };

    Page {
        items: page_items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Number of requests in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Requests awaiting a decision.
    pub pending_count: usize,
    /// Approved requests.
    pub approved_count: usize,
    /// Rejected requests.
    pub rejected_count: usize,
}

impl StatusCounts {
    /// Tallies statuses across `requests`.
    pub fn from_requests<'a>(requests: impl IntoIterator<Item = &'a LeaveRequest>) -> Self {
        requests
            .into_iter()
            .fold(Self::default(), |mut counts, request| {
                match request.status {
                    LeaveStatus::Pending => counts.pending_count += 1,
                    LeaveStatus::Approved => counts.approved_count += 1,
                    LeaveStatus::Rejected => counts.rejected_count += 1,
                }
                counts
            })
    }

    /// Sum of all statuses.
    pub fn total(&self) -> usize {
        self.pending_count + self.approved_count + self.rejected_count
    }
}

/// Ids chosen for a bulk action, always a subset of the visible ids.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    visible: Vec<RequestId>,
    selected: HashSet<RequestId>,
}

impl SelectionSet {
    /// Creates an empty selection with nothing visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the visible ids, dropping any selection that is no longer visible.
    pub fn set_visible(&mut self, ids: impl IntoIterator<Item = RequestId>) {
        self.visible = ids.into_iter().collect();
        let visible: HashSet<&RequestId> = self.visible.iter().collect();
        self.selected.retain(|id| visible.contains(id));
    }

    /// Sets the visible ids from a page of requests.
    pub fn show_page(&mut self, page: &Page<LeaveRequest>) {
        self.set_visible(page.items.iter().map(|r| r.id.clone()));
    }

    /// The ids currently visible.
    pub fn visible(&self) -> &[RequestId] {
        &self.visible
    }

    fn is_visible(&self, id: &RequestId) -> bool {
        self.visible.contains(id)
    }

    /// Selects a visible id. Returns false if the id is not visible.
    pub fn select(&mut self, id: &RequestId) -> bool {
        if !self.is_visible(id) {
            return false;
        }
        self.selected.insert(id.clone());
        true
    }

    /// Removes an id from the selection. Returns true if it was selected.
    pub fn deselect(&mut self, id: &RequestId) -> bool {
        self.selected.remove(id)
    }

    /// Flips the selection of a visible id, returning whether it is now selected.
    pub fn toggle(&mut self, id: &RequestId) -> bool {
        if self.selected.contains(id) {
            self.selected.remove(id);
            false
        } else {
            self.select(id)
        }
    }

    /// Selects exactly the visible ids.
    pub fn select_all(&mut self) {
        self.selected = self.visible.iter().cloned().collect();
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Returns true if `id` is selected.
    pub fn is_selected(&self, id: &RequestId) -> bool {
        self.selected.contains(id)
    }

    /// Returns true if something is visible and all of it is selected.
    pub fn is_all_selected(&self) -> bool {
        !self.visible.is_empty() && self.visible.iter().all(|id| self.selected.contains(id))
    }

    /// Selected ids in visible order.
    pub fn selected(&self) -> Vec<RequestId> {
        self.visible
            .iter()
            .filter(|id| self.selected.contains(*id))
            .cloned()
            .collect()
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
