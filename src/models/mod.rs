//! Core data models for the leave engine.
//!
//! This module contains the domain types shared by the validator, ledger,
//! workflow and query components.

mod balance;
mod date_range;
mod employee;
mod leave_request;

pub use balance::{BalanceEntry, BalanceSnapshot};
pub use date_range::{total_days, DateRange};
pub use employee::{Employee, EmployeeId};
pub use leave_request::{
    Decision, LeaveRequest, LeaveStatus, LeaveType, RequestId, SubmissionInput,
};
