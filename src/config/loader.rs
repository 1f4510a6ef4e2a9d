//! Configuration loading functionality.
//!
//! This module provides the [`PolicyLoader`] type for loading leave policy
//! and the employee directory from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{LeaveError, LeaveResult};

use super::types::{EmployeesFile, LeaveConfig, PolicyFile};

/// Loads and validates a leave policy directory.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml     # Policy metadata, leave types, allotment overrides
/// └── employees.yaml  # Employee directory
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::{AllotmentPolicy, PolicyLoader};
///
/// let loader = PolicyLoader::load("./config/default")?;
/// println!("Loaded policy: {}", loader.config().metadata().name);
/// assert!(loader.config().is_allowed("Annual Leave"));
/// # Ok::<(), leave_engine::error::LeaveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    config: LeaveConfig,
}

impl PolicyLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails with `ConfigNotFound` if a file is missing and with
    /// `ConfigParseError` if a file is malformed, lists no leave types,
    /// declares a leave type twice, or overrides an undeclared leave type.
    pub fn load<P: AsRef<Path>>(path: P) -> LeaveResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<PolicyFile>(&policy_path)?;
        Self::check_policy(&policy, &policy_path)?;

        let employees_path = path.join("employees.yaml");
        let employees = Self::load_yaml::<EmployeesFile>(&employees_path)?;

        info!(
            policy = %policy.policy.name,
            version = %policy.policy.version,
            leave_types = policy.leave_types.len(),
            employees = employees.employees.len(),
            "Loaded leave policy"
        );

        let config = LeaveConfig::new(
            policy.policy,
            policy.leave_types,
            employees.employees,
            policy.allotment_overrides,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LeaveResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LeaveError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LeaveError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_policy(policy: &PolicyFile, path: &Path) -> LeaveResult<()> {
        let parse_error = |message: String| LeaveError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        if policy.leave_types.is_empty() {
            return Err(parse_error("no leave types declared".to_string()));
        }

        let mut seen = HashSet::new();
        for leave_type in &policy.leave_types {
            if leave_type.name.trim().is_empty() {
                return Err(parse_error("leave type name is blank".to_string()));
            }
            if !seen.insert(leave_type.name.as_str()) {
                return Err(parse_error(format!(
                    "duplicate leave type: {}",
                    leave_type.name
                )));
            }
        }

        if let Some(stray) = policy
            .allotment_overrides
            .iter()
            .find(|o| !seen.contains(o.leave_type.as_str()))
        {
            return Err(parse_error(format!(
                "override for undeclared leave type: {}",
                stray.leave_type
            )));
        }

        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &LeaveConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> LeaveConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AllotmentPolicy, EmployeeDirectory};
    use crate::models::{EmployeeId, LeaveType};
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn scratch_dir(name: &str, policy: &str, employees: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "leave-engine-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("policy.yaml"), policy).unwrap();
        fs::write(dir.join("employees.yaml"), employees).unwrap();
        dir
    }

    #[test]
    fn test_load_default_configuration() {
        let result = PolicyLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().metadata().name, "Standard Leave Policy");
        assert!(loader.config().is_allowed("Annual Leave"));
        assert!(loader.config().is_allowed("Sick Leave"));
    }

    #[test]
    fn test_default_allotments_loaded() {
        let config = PolicyLoader::load(config_path()).unwrap().into_config();
        let emp = EmployeeId::new("emp_002");
        assert_eq!(config.allotment(&emp, &LeaveType::new("Annual Leave")), 20);
        assert_eq!(config.allotment(&emp, &LeaveType::new("Sick Leave")), 10);
    }

    #[test]
    fn test_default_directory_loaded() {
        let config = PolicyLoader::load(config_path()).unwrap().into_config();
        let employee = config.find(&EmployeeId::new("emp_001")).unwrap();
        assert_eq!(employee.name, "Amara Okafor");
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = PolicyLoader::load("/nonexistent/path");

        match result {
            Err(LeaveError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("bad-yaml", "policy: [unclosed", "employees: []");
        let result = PolicyLoader::load(&dir);
        assert!(matches!(result, Err(LeaveError::ConfigParseError { .. })));
    }

    #[test]
    fn test_duplicate_leave_type_rejected() {
        let policy = r#"
policy:
  name: Dup
  version: "1"
leave_types:
  - name: Annual Leave
    default_allotment: 20
  - name: Annual Leave
    default_allotment: 15
"#;
        let dir = scratch_dir("dup", policy, "employees: []");
        match PolicyLoader::load(&dir) {
            Err(LeaveError::ConfigParseError { message, .. }) => {
                assert!(message.contains("duplicate leave type"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_override_for_undeclared_type_rejected() {
        let policy = r#"
policy:
  name: Stray
  version: "1"
leave_types:
  - name: Annual Leave
    default_allotment: 20
allotment_overrides:
  - employee_id: emp_001
    leave_type: Sabbatical
    total_days: 90
"#;
        let dir = scratch_dir("stray", policy, "employees: []");
        assert!(matches!(
            PolicyLoader::load(&dir),
            Err(LeaveError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_empty_leave_types_rejected() {
        let policy = "policy:\n  name: Empty\n  version: \"1\"\nleave_types: []\n";
        let dir = scratch_dir("empty", policy, "employees: []");
        assert!(matches!(
            PolicyLoader::load(&dir),
            Err(LeaveError::ConfigParseError { .. })
        ));
    }
}
