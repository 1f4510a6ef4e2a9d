//! Configuration types for leave policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a policy directory.

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::{Employee, EmployeeId, LeaveType};

/// Metadata about the leave policy.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyMetadata {
    /// The human-readable name of the policy.
    pub name: String,
    /// The version or effective date of the policy.
    pub version: String,
}

/// A leave type on the allow-list together with its default allotment.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypePolicy {
    /// The leave type tag (e.g., "Annual Leave").
    pub name: String,
    /// Days granted to an employee the first time the type is referenced.
    pub default_allotment: u32,
}

/// A per-employee allotment that replaces the leave type's default.
#[derive(Debug, Clone, Deserialize)]
pub struct AllotmentOverride {
    /// The employee the override applies to.
    pub employee_id: EmployeeId,
    /// The leave type the override applies to.
    pub leave_type: LeaveType,
    /// The allotted days.
    pub total_days: u32,
}

/// Structure of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Policy metadata.
    pub policy: PolicyMetadata,
    /// The leave type allow-list.
    pub leave_types: Vec<LeaveTypePolicy>,
    /// Optional per-employee allotments.
    #[serde(default)]
    pub allotment_overrides: Vec<AllotmentOverride>,
}

/// Structure of `employees.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesFile {
    /// Directory entries.
    pub employees: Vec<Employee>,
}

/// The complete leave configuration.
///
/// Serves both as the allotment policy consulted by the ledger and as the
/// read-only employee directory consulted at submission.
#[derive(Debug, Clone)]
pub struct LeaveConfig {
    metadata: PolicyMetadata,
    leave_types: Vec<LeaveTypePolicy>,
    employees: Vec<Employee>,
    overrides: HashMap<(EmployeeId, LeaveType), u32>,
}

impl LeaveConfig {
    /// Creates a configuration from its component parts.
    ///
    /// Leave types keep their given order; later overrides for the same
    /// (employee, leave type) pair win.
    pub fn new(
        metadata: PolicyMetadata,
        leave_types: Vec<LeaveTypePolicy>,
        employees: Vec<Employee>,
        overrides: Vec<AllotmentOverride>,
    ) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|o| ((o.employee_id, o.leave_type), o.total_days))
            .collect();
        Self {
            metadata,
            leave_types,
            employees,
            overrides,
        }
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.metadata
    }

    /// Returns the configured leave types in declaration order.
    pub fn leave_type_policies(&self) -> &[LeaveTypePolicy] {
        &self.leave_types
    }

    /// Looks up a leave type policy by exact name.
    pub fn leave_type(&self, name: &str) -> Option<&LeaveTypePolicy> {
        self.leave_types.iter().find(|lt| lt.name == name)
    }

    /// Returns all directory entries.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns the override for a pair, if any.
    pub fn allotment_override(&self, employee_id: &EmployeeId, leave_type: &LeaveType) -> Option<u32> {
        self.overrides
            .get(&(employee_id.clone(), leave_type.clone()))
            .copied()
    }
}
