//! Leave balance ledger.
//!
//! Tracks allotted and consumed days per (employee, leave type). Entries are
//! materialized on first reference from the [`AllotmentPolicy`]. Every
//! read-check-write runs under the ledger lock, so two debits against the
//! same entry can never both observe the same `used_days`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, warn};

use crate::config::AllotmentPolicy;
use crate::error::{LeaveError, LeaveResult};
use crate::models::{BalanceEntry, BalanceSnapshot, EmployeeId, LeaveType};

type EntryKey = (EmployeeId, LeaveType);

/// Per-employee, per-leave-type balance book.
pub struct LeaveBalanceLedger {
    policy: Arc<dyn AllotmentPolicy>,
    entries: Mutex<HashMap<EntryKey, BalanceEntry>>,
}

impl LeaveBalanceLedger {
    /// Creates an empty ledger backed by `policy` for default allotments.
    pub fn new(policy: Arc<dyn AllotmentPolicy>) -> Self {
        Self {
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EntryKey, BalanceEntry>> {
        // Every critical section leaves entries valid, so a poisoned lock is still usable.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get_or_create<'a>(
        &self,
        entries: &'a mut HashMap<EntryKey, BalanceEntry>,
        employee_id: &EmployeeId,
        leave_type: &LeaveType,
    ) -> &'a mut BalanceEntry {
        entries
            .entry((employee_id.clone(), leave_type.clone()))
            .or_insert_with(|| {
                let total = self.policy.allotment(employee_id, leave_type);
                debug!(
                    employee_id = %employee_id,
                    leave_type = %leave_type,
                    total_days = total,
                    "Materialized ledger entry"
                );
                BalanceEntry::new(employee_id.clone(), leave_type.clone(), total)
            })
    }

    /// Returns the balance for the pair, creating it with the default allotment if absent.
    pub fn get(&self, employee_id: &EmployeeId, leave_type: &LeaveType) -> BalanceSnapshot {
        let mut entries = self.lock();
        self.get_or_create(&mut entries, employee_id, leave_type)
            .snapshot()
    }

    /// Balances for every policy leave type, in policy order.
    pub fn balances_for(&self, employee_id: &EmployeeId) -> Vec<BalanceSnapshot> {
        let leave_types = self.policy.leave_types();
        let mut entries = self.lock();
        leave_types
            .iter()
            .map(|lt| self.get_or_create(&mut entries, employee_id, lt).snapshot())
            .collect()
    }

    /// Consumes `days` from the balance.
    ///
    /// All-or-nothing: fails with `InsufficientBalance` and leaves the entry
    /// untouched when the allotment cannot cover the days.
    pub fn debit(
        &self,
        employee_id: &EmployeeId,
        leave_type: &LeaveType,
        days: u32,
    ) -> LeaveResult<BalanceSnapshot> {
        let mut entries = self.lock();
        let entry = self.get_or_create(&mut entries, employee_id, leave_type);

        if !entry.can_cover(days) {
            warn!(
                employee_id = %employee_id,
                leave_type = %leave_type,
                requested = days,
                remaining = entry.remaining_days(),
                "Debit refused"
            );
            return Err(LeaveError::InsufficientBalance {
                employee_id: employee_id.to_string(),
                leave_type: leave_type.to_string(),
                requested: days,
                remaining: entry.remaining_days(),
            });
        }

        entry.used_days += days;
        debug!(
            employee_id = %employee_id,
            leave_type = %leave_type,
            days,
            used_days = entry.used_days,
            "Debited balance"
        );
        Ok(entry.snapshot())
    }

    /// Returns `days` to the balance, reversing an earlier debit.
    ///
    /// If more days are credited than were used, `used_days` is clamped to
    /// zero and `LedgerInconsistency` is returned; the clamp is committed.
    pub fn credit(
        &self,
        employee_id: &EmployeeId,
        leave_type: &LeaveType,
        days: u32,
    ) -> LeaveResult<BalanceSnapshot> {
        let mut entries = self.lock();
        let entry = self.get_or_create(&mut entries, employee_id, leave_type);

        if days > entry.used_days {
            let message = format!(
                "credit of {} day(s) exceeds {} used; clamped to zero",
                days, entry.used_days
            );
            entry.used_days = 0;
            error!(
                employee_id = %employee_id,
                leave_type = %leave_type,
                days,
                "Ledger credit exceeded used days"
            );
            return Err(LeaveError::LedgerInconsistency {
                employee_id: employee_id.to_string(),
                leave_type: leave_type.to_string(),
                message,
            });
        }

        entry.used_days -= days;
        debug!(
            employee_id = %employee_id,
            leave_type = %leave_type,
            days,
            used_days = entry.used_days,
            "Credited balance"
        );
        Ok(entry.snapshot())
    }
}
