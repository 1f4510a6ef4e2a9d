//! Leave request lifecycle.
//!
//! [`LeaveWorkflow`] owns the request collection and the balance ledger and
//! is the only component that mutates either. A decision holds the request's
//! slot lock from the status check through the ledger debit to the status
//! write, so of two concurrent decisions on one request exactly one commits
//! and the other observes `InvalidState`.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{AllotmentPolicy, EmployeeDirectory, LeaveConfig};
use crate::error::{LeaveError, LeaveResult};
use crate::ledger::LeaveBalanceLedger;
use crate::models::{
    BalanceSnapshot, Decision, Employee, EmployeeId, LeaveRequest, LeaveStatus, LeaveType,
    RequestId, SubmissionInput,
};
use crate::query::{self, RequestFilter, StatusCounts};
use crate::store::{lock_slot, RequestStore};
use crate::validation::{
    optional_text, validate_transition_notes, RequestValidator, UNKNOWN_EMPLOYEE,
};

/// A per-id failure inside a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    /// The id the failure belongs to.
    pub id: RequestId,
    /// Why the id failed.
    pub error: LeaveError,
}

/// Result of a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Number of requests removed.
    pub deleted_count: usize,
    /// Ids removed, in input order.
    pub deleted: Vec<RequestId>,
    /// Per-id failures. A removed request whose credit hit a ledger
    /// inconsistency appears both here and in `deleted`.
    pub errors: Vec<BulkFailure>,
}

/// Result of a bulk status change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Requests that transitioned, in input order.
    pub updated: Vec<LeaveRequest>,
    /// Per-id failures.
    pub errors: Vec<BulkFailure>,
}

/// Requests matching a filter plus counts over the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestListing {
    /// Matching requests in submission order.
    pub requests: Vec<LeaveRequest>,
    /// Status tallies across all requests, regardless of the filter.
    pub counts: StatusCounts,
}

/// One employee's requests and balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeLeaveView {
    /// The directory entry.
    pub employee: Employee,
    /// The employee's requests in submission order.
    pub requests: Vec<LeaveRequest>,
    /// One balance per configured leave type.
    pub balances: Vec<BalanceSnapshot>,
}

/// The leave request state machine.
pub struct LeaveWorkflow {
    store: RequestStore,
    ledger: LeaveBalanceLedger,
    validator: RequestValidator,
    directory: Arc<dyn EmployeeDirectory>,
    clock: Arc<dyn Clock>,
}

impl LeaveWorkflow {
    /// Creates a workflow whose policy and directory both come from `config`.
    pub fn new(config: Arc<LeaveConfig>) -> Self {
        Self::with_parts(config.clone(), config, Arc::new(SystemClock))
    }

    /// Creates a workflow from explicit collaborators.
    pub fn with_parts(
        policy: Arc<dyn AllotmentPolicy>,
        directory: Arc<dyn EmployeeDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store: RequestStore::new(),
            ledger: LeaveBalanceLedger::new(policy.clone()),
            validator: RequestValidator::new(policy, directory.clone()),
            directory,
            clock,
        }
    }

    /// Validates and records a new pending request.
    ///
    /// Nothing is created when validation fails.
    pub fn submit(&self, input: &SubmissionInput) -> LeaveResult<LeaveRequest> {
        let validated = self.validator.validate_submission(input).inspect_err(|err| {
            warn!(
                employee_id = input.employee_id.as_deref().unwrap_or_default(),
                error = %err,
                "Submission rejected"
            );
        })?;

        let request = LeaveRequest {
            id: RequestId::generate(),
            employee_id: validated.employee.id,
            employee_name: validated.employee.name,
            leave_type: validated.leave_type,
            range: validated.range,
            reason: validated.reason,
            document_ref: validated.document_ref,
            status: LeaveStatus::Pending,
            admin_notes: None,
            created_at: self.clock.now(),
            decided_at: None,
        };

        info!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            leave_type = %request.leave_type,
            days = request.total_days(),
            "Leave request submitted"
        );

        self.store.insert(request.clone());
        Ok(request)
    }

    /// Approves or rejects a pending request.
    ///
    /// Checks run in order: existence, pending status, notes, and for
    /// approvals the balance debit. Any failure leaves the request and the
    /// ledger exactly as they were.
    ///
    /// Notes are stored trimmed; blank notes are stored as `None`.
    pub fn decide(
        &self,
        request_id: &RequestId,
        decision: Decision,
        notes: Option<&str>,
    ) -> LeaveResult<LeaveRequest> {
        let slot = self
            .store
            .slot(request_id)
            .ok_or_else(|| LeaveError::not_found(request_id.as_str()))?;
        let mut slot = lock_slot(&slot);

        if slot.removed {
            return Err(LeaveError::not_found(request_id.as_str()));
        }

        let request = &mut slot.request;
        if !request.is_pending() {
            return Err(LeaveError::InvalidState {
                id: request_id.to_string(),
                status: request.status,
            });
        }

        validate_transition_notes(decision, notes)?;

        if decision == Decision::Approve {
            self.ledger
                .debit(&request.employee_id, &request.leave_type, request.total_days())?;
        }

        request.status = decision.target_status();
        request.admin_notes = optional_text(notes);
        request.decided_at = Some(self.clock.now());

        info!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            status = %request.status,
            days = request.total_days(),
            "Leave request decided"
        );

        Ok(request.clone())
    }

    /// Applies one decision to many requests with per-id isolation.
    ///
    /// The notes are checked once up front; if they fail, no request is touched.
    pub fn decide_many(
        &self,
        request_ids: &[RequestId],
        decision: Decision,
        notes: Option<&str>,
    ) -> LeaveResult<BulkOutcome> {
        validate_transition_notes(decision, notes)?;

        let mut outcome = BulkOutcome::default();
        for id in dedup(request_ids) {
            match self.decide(id, decision, notes) {
                Ok(request) => outcome.updated.push(request),
                Err(error) => outcome.errors.push(BulkFailure {
                    id: id.clone(),
                    error,
                }),
            }
        }

        info!(
            requested = request_ids.len(),
            updated = outcome.updated.len(),
            failed = outcome.errors.len(),
            "Bulk decision processed"
        );
        Ok(outcome)
    }

    /// Deletes requests, crediting back the days of approved ones.
    ///
    /// Unknown ids are reported per id and never abort the batch.
    pub fn delete(&self, request_ids: &[RequestId]) -> DeleteOutcome {
        let mut outcome = DeleteOutcome::default();

        for id in dedup(request_ids) {
            match self.delete_one(id) {
                Ok(credit_error) => {
                    outcome.deleted.push(id.clone());
                    if let Some(error) = credit_error {
                        outcome.errors.push(BulkFailure {
                            id: id.clone(),
                            error,
                        });
                    }
                }
                Err(error) => outcome.errors.push(BulkFailure {
                    id: id.clone(),
                    error,
                }),
            }
        }

        outcome.deleted_count = outcome.deleted.len();
        info!(
            requested = request_ids.len(),
            deleted = outcome.deleted_count,
            failed = outcome.errors.len(),
            "Bulk delete processed"
        );
        outcome
    }

    /// Removes one request. `Ok(Some(_))` means it was removed but the
    /// ledger reported an inconsistency while crediting.
    fn delete_one(&self, request_id: &RequestId) -> LeaveResult<Option<LeaveError>> {
        let slot = self
            .store
            .unlink(request_id)
            .ok_or_else(|| LeaveError::not_found(request_id.as_str()))?;
        let mut slot = lock_slot(&slot);
        slot.removed = true;

        let request = &slot.request;
        let credit_error = if request.status == LeaveStatus::Approved {
            self.ledger
                .credit(&request.employee_id, &request.leave_type, request.total_days())
                .err()
        } else {
            None
        };

        info!(
            request_id = %request.id,
            status = %request.status,
            "Leave request deleted"
        );
        Ok(credit_error)
    }

    /// Fetches one request.
    pub fn get(&self, request_id: &RequestId) -> LeaveResult<LeaveRequest> {
        self.store
            .get(request_id)
            .ok_or_else(|| LeaveError::not_found(request_id.as_str()))
    }

    /// All requests in submission order.
    pub fn requests(&self) -> Vec<LeaveRequest> {
        self.store.snapshot()
    }

    /// Number of stored requests.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if no requests are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Requests matching `filter`, with counts over the whole collection.
    pub fn list_requests(&self, filter: &RequestFilter) -> RequestListing {
        let all = self.store.snapshot();
        RequestListing {
            counts: StatusCounts::from_requests(&all),
            requests: query::filter(&all, filter),
        }
    }

    /// One employee's requests and per-leave-type balances.
    pub fn employee_overview(&self, employee_id: &EmployeeId) -> LeaveResult<EmployeeLeaveView> {
        let employee = self
            .directory
            .find(employee_id)
            .ok_or_else(|| LeaveError::validation(format!("{UNKNOWN_EMPLOYEE}: {employee_id}")))?;

        let requests = self
            .store
            .snapshot()
            .into_iter()
            .filter(|r| &r.employee_id == employee_id)
            .collect();

        Ok(EmployeeLeaveView {
            employee,
            requests,
            balances: self.ledger.balances_for(employee_id),
        })
    }

    /// Current balance for one pair.
    pub fn balance(&self, employee_id: &EmployeeId, leave_type: &LeaveType) -> BalanceSnapshot {
        self.ledger.get(employee_id, leave_type)
    }

    /// The employee directory, for populating submission forms.
    pub fn employees(&self) -> Vec<Employee> {
        self.directory.list()
    }
}

fn dedup(ids: &[RequestId]) -> impl Iterator<Item = &RequestId> {
    let mut seen = HashSet::new();
    ids.iter().filter(move |id| seen.insert(*id))
}
