//! Employee identity as seen by the leave engine.
//!
//! Employees are owned by an external registry; the engine only reads them
//! through [`crate::config::EmployeeDirectory`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an employee in the external registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directory entry for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Display name, used for request search.
    pub name: String,
    /// Optional department label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee_without_department() {
        let json = r#"{"id": "emp_001", "name": "Amara Okafor"}"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, EmployeeId::new("emp_001"));
        assert_eq!(employee.name, "Amara Okafor");
        assert!(employee.department.is_none());
    }

    #[test]
    fn test_employee_id_serializes_as_plain_string() {
        let id = EmployeeId::new("emp_042");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"emp_042\"");
        assert_eq!(id.to_string(), "emp_042");
    }
}
