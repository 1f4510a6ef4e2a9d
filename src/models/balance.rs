//! Ledger entries tracking allotted versus consumed leave days.

use serde::{Deserialize, Serialize};

use super::employee::EmployeeId;
use super::leave_request::LeaveType;

/// Per-employee, per-leave-type bookkeeping.
///
/// `used_days <= total_days` holds after every committed ledger operation.
/// Remaining days are always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// The employee the entry belongs to.
    pub employee_id: EmployeeId,
    /// The leave type the entry tracks.
    pub leave_type: LeaveType,
    /// Days allotted by policy.
    pub total_days: u32,
    /// Days consumed by approved requests.
    pub used_days: u32,
}

impl BalanceEntry {
    /// Creates an untouched entry with the given allotment.
    pub fn new(employee_id: EmployeeId, leave_type: LeaveType, total_days: u32) -> Self {
        Self {
            employee_id,
            leave_type,
            total_days,
            used_days: 0,
        }
    }

    /// Days still available.
    pub fn remaining_days(&self) -> u32 {
        self.total_days.saturating_sub(self.used_days)
    }

    /// Returns true if `days` more can be consumed without exceeding the allotment.
    pub fn can_cover(&self, days: u32) -> bool {
        self.used_days
            .checked_add(days)
            .is_some_and(|used| used <= self.total_days)
    }

    /// A read-only view including the derived remaining days.
    pub fn snapshot(&self) -> BalanceSnapshot {
        BalanceSnapshot {
            employee_id: self.employee_id.clone(),
            leave_type: self.leave_type.clone(),
            total_days: self.total_days,
            used_days: self.used_days,
            remaining_days: self.remaining_days(),
        }
    }
}

/// Point-in-time view of a ledger entry handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// The employee the balance belongs to.
    pub employee_id: EmployeeId,
    /// The leave type of the balance.
    pub leave_type: LeaveType,
    /// Days allotted.
    pub total_days: u32,
    /// Days consumed.
    pub used_days: u32,
    /// Days still available.
    pub remaining_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(total: u32, used: u32) -> BalanceEntry {
        BalanceEntry {
            employee_id: EmployeeId::new("emp_001"),
            leave_type: LeaveType::new("Annual Leave"),
            total_days: total,
            used_days: used,
        }
    }

    #[test]
    fn test_remaining_is_derived() {
        assert_eq!(entry(10, 8).remaining_days(), 2);
        assert_eq!(entry(10, 8).snapshot().remaining_days, 2);
    }

    #[test]
    fn test_can_cover_up_to_allotment() {
        let balance = entry(10, 8);
        assert!(balance.can_cover(2));
        assert!(!balance.can_cover(3));
        assert!(!balance.can_cover(u32::MAX));
    }

    #[test]
    fn test_new_entry_is_unused() {
        let balance = BalanceEntry::new(
            EmployeeId::new("emp_002"),
            LeaveType::new("Sick Leave"),
            12,
        );
        assert_eq!(balance.used_days, 0);
        assert_eq!(balance.remaining_days(), 12);
    }
}
