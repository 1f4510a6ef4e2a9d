//! Lookup seams the engine consumes from its collaborators.
//!
//! The allotment source and the employee registry live outside the engine.
//! [`LeaveConfig`] implements both traits from YAML; tests and embedders can
//! supply their own implementations.

use crate::models::{Employee, EmployeeId, LeaveType};

use super::types::LeaveConfig;

/// Source of default allotments and of the leave type allow-list.
pub trait AllotmentPolicy: Send + Sync {
    /// Days granted when a ledger entry is first created for the pair.
    fn allotment(&self, employee_id: &EmployeeId, leave_type: &LeaveType) -> u32;

    /// The leave types employees may request, in display order.
    fn leave_types(&self) -> Vec<LeaveType>;

    /// Returns true if `leave_type` is on the allow-list.
    fn is_allowed(&self, leave_type: &str) -> bool {
        self.leave_types().iter().any(|lt| lt.as_str() == leave_type)
    }
}

/// Read-only view of the external employee registry.
pub trait EmployeeDirectory: Send + Sync {
    /// Finds an employee by id.
    fn find(&self, employee_id: &EmployeeId) -> Option<Employee>;

    /// Lists every known employee.
    fn list(&self) -> Vec<Employee>;
}

impl AllotmentPolicy for LeaveConfig {
    fn allotment(&self, employee_id: &EmployeeId, leave_type: &LeaveType) -> u32 {
        self.allotment_override(employee_id, leave_type)
            .or_else(|| {
                self.leave_type(leave_type.as_str())
                    .map(|lt| lt.default_allotment)
            })
            .unwrap_or(0)
    }

    fn leave_types(&self) -> Vec<LeaveType> {
        self.leave_type_policies()
            .iter()
            .map(|lt| LeaveType::new(lt.name.clone()))
            .collect()
    }

    fn is_allowed(&self, leave_type: &str) -> bool {
        self.leave_type(leave_type).is_some()
    }
}

impl EmployeeDirectory for LeaveConfig {
    fn find(&self, employee_id: &EmployeeId) -> Option<Employee> {
        self.employees()
            .iter()
            .find(|e| &e.id == employee_id)
            .cloned()
    }

    fn list(&self) -> Vec<Employee> {
        self.employees().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AllotmentOverride, LeaveTypePolicy, PolicyMetadata};

    fn config() -> LeaveConfig {
        LeaveConfig::new(
            PolicyMetadata {
                name: "Test policy".to_string(),
                version: "2026-01-01".to_string(),
            },
            vec![
                LeaveTypePolicy {
                    name: "Annual Leave".to_string(),
                    default_allotment: 20,
                },
                LeaveTypePolicy {
                    name: "Sick Leave".to_string(),
                    default_allotment: 10,
                },
            ],
            vec![Employee {
                id: EmployeeId::new("emp_001"),
                name: "Amara Okafor".to_string(),
                department: None,
            }],
            vec![AllotmentOverride {
                employee_id: EmployeeId::new("emp_001"),
                leave_type: LeaveType::new("Annual Leave"),
                total_days: 25,
            }],
        )
    }

    #[test]
    fn test_override_wins_over_default() {
        let config = config();
        let emp = EmployeeId::new("emp_001");
        assert_eq!(config.allotment(&emp, &LeaveType::new("Annual Leave")), 25);
        assert_eq!(config.allotment(&emp, &LeaveType::new("Sick Leave")), 10);
    }

    #[test]
    fn test_default_applies_to_other_employees() {
        let config = config();
        let emp = EmployeeId::new("emp_999");
        assert_eq!(config.allotment(&emp, &LeaveType::new("Annual Leave")), 20);
    }

    #[test]
    fn test_unknown_leave_type_has_no_allotment() {
        let config = config();
        let emp = EmployeeId::new("emp_001");
        assert_eq!(config.allotment(&emp, &LeaveType::new("Sabbatical")), 0);
        assert!(!config.is_allowed("Sabbatical"));
        assert!(config.is_allowed("Sick Leave"));
    }

    #[test]
    fn test_leave_types_keep_declaration_order() {
        let types = config().leave_types();
        assert_eq!(
            types,
            vec![LeaveType::new("Annual Leave"), LeaveType::new("Sick Leave")]
        );
    }

    #[test]
    fn test_directory_find() {
        let config = config();
        let found = config.find(&EmployeeId::new("emp_001")).unwrap();
        assert_eq!(found.name, "Amara Okafor");
        assert!(config.find(&EmployeeId::new("emp_404")).is_none());
        assert_eq!(config.list().len(), 1);
    }
}
