//! Submission-time and transition-time checks.
//!
//! The validator is a pure function of its input plus the policy and
//! directory lookups; it never mutates anything.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::{AllotmentPolicy, EmployeeDirectory};
use crate::error::{LeaveError, LeaveResult};
use crate::models::{
    total_days, DateRange, Decision, Employee, EmployeeId, LeaveType, SubmissionInput,
};

/// Message for a missing or blank required field.
pub const MISSING_REQUIRED_FIELD: &str = "missing required field";
/// Message for a range that covers no days.
pub const INVALID_DATE_RANGE: &str = "invalid date range";
/// Message for a rejection without notes.
pub const REJECTION_REASON_REQUIRED: &str = "rejection reason required";
/// Message for a leave type outside the allow-list.
pub const UNKNOWN_LEAVE_TYPE: &str = "unknown leave type";
/// Message for an employee the directory does not know.
pub const UNKNOWN_EMPLOYEE: &str = "unknown employee";

/// A submission that passed validation, with its employee resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    /// The directory entry of the submitting employee.
    pub employee: Employee,
    /// The allow-listed leave type.
    pub leave_type: LeaveType,
    /// The requested range, covering at least one day.
    pub range: DateRange,
    /// Trimmed reason, if any.
    pub reason: Option<String>,
    /// Trimmed document reference, if any.
    pub document_ref: Option<String>,
}

/// Enforces the submission and decision invariants.
#[derive(Clone)]
pub struct RequestValidator {
    policy: Arc<dyn AllotmentPolicy>,
    directory: Arc<dyn EmployeeDirectory>,
}

impl RequestValidator {
    /// Creates a validator over the given lookups.
    pub fn new(policy: Arc<dyn AllotmentPolicy>, directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { policy, directory }
    }

    /// Checks a raw submission.
    ///
    /// Required fields are checked first, then the date range, then the
    /// policy and directory lookups.
    pub fn validate_submission(&self, input: &SubmissionInput) -> LeaveResult<ValidatedSubmission> {
        let employee_id = required_text(input.employee_id.as_deref())?;
        let leave_type = required_text(input.leave_type.as_deref())?;
        let start = required_date(input.start_date)?;
        let end = required_date(input.end_date)?;

        if total_days(start, end) == 0 {
            return Err(LeaveError::validation(INVALID_DATE_RANGE));
        }

        if !self.policy.is_allowed(leave_type) {
            return Err(LeaveError::validation(format!(
                "{UNKNOWN_LEAVE_TYPE}: {leave_type}"
            )));
        }

        let employee = self
            .directory
            .find(&EmployeeId::new(employee_id))
            .ok_or_else(|| LeaveError::validation(format!("{UNKNOWN_EMPLOYEE}: {employee_id}")))?;

        Ok(ValidatedSubmission {
            employee,
            leave_type: LeaveType::new(leave_type),
            range: DateRange::new(start, end),
            reason: optional_text(input.reason.as_deref()),
            document_ref: optional_text(input.document_ref.as_deref()),
        })
    }
}

/// Checks the notes accompanying a decision.
///
/// Rejections must carry a non-blank reason; approvals need none.
pub fn validate_transition_notes(decision: Decision, notes: Option<&str>) -> LeaveResult<()> {
    match decision {
        Decision::Reject if optional_text(notes).is_none() => {
            Err(LeaveError::validation(REJECTION_REASON_REQUIRED))
        }
        _ => Ok(()),
    }
}

fn required_text(value: Option<&str>) -> LeaveResult<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LeaveError::validation(MISSING_REQUIRED_FIELD))
}

fn required_date(value: Option<NaiveDate>) -> LeaveResult<NaiveDate> {
    value.ok_or_else(|| LeaveError::validation(MISSING_REQUIRED_FIELD))
}

/// Trims `value`, treating blank text as absent.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LeaveConfig, LeaveTypePolicy, PolicyMetadata};

    fn validator() -> RequestValidator {
        let config = Arc::new(LeaveConfig::new(
            PolicyMetadata {
                name: "Test".to_string(),
                version: "1".to_string(),
            },
            vec![LeaveTypePolicy {
                name: "Annual Leave".to_string(),
                default_allotment: 20,
            }],
            vec![Employee {
                id: EmployeeId::new("emp_001"),
                name: "Amara Okafor".to_string(),
                department: None,
            }],
            vec![],
        ));
        RequestValidator::new(config.clone(), config)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_input() -> SubmissionInput {
        SubmissionInput {
            employee_id: Some("emp_001".to_string()),
            leave_type: Some("Annual Leave".to_string()),
            start_date: Some(date(2026, 6, 1)),
            end_date: Some(date(2026, 6, 5)),
            reason: Some("  Summer break ".to_string()),
            document_ref: Some("   ".to_string()),
        }
    }

    fn assert_validation(result: LeaveResult<ValidatedSubmission>, expected: &str) {
        match result {
            Err(LeaveError::Validation { message }) => {
                assert!(
                    message.starts_with(expected),
                    "expected '{}', got '{}'",
                    expected,
                    message
                );
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_submission_is_resolved() {
        let validated = validator().validate_submission(&valid_input()).unwrap();
        assert_eq!(validated.employee.name, "Amara Okafor");
        assert_eq!(validated.range.total_days(), 5);
        assert_eq!(validated.reason.as_deref(), Some("Summer break"));
        assert!(validated.document_ref.is_none());
    }

    #[test]
    fn test_each_missing_required_field_fails() {
        let validator = validator();
        let mutations: [fn(&mut SubmissionInput); 4] = [
            |i| i.employee_id = None,
            |i| i.leave_type = Some("  ".to_string()),
            |i| i.start_date = None,
            |i| i.end_date = None,
        ];
        for mutate in mutations {
            let mut input = valid_input();
            mutate(&mut input);
            assert_validation(validator.validate_submission(&input), MISSING_REQUIRED_FIELD);
        }
    }

    #[test]
    fn test_inverted_range_fails() {
        let mut input = valid_input();
        input.start_date = Some(date(2026, 6, 5));
        input.end_date = Some(date(2026, 6, 1));
        assert_validation(validator().validate_submission(&input), INVALID_DATE_RANGE);
    }

    #[test]
    fn test_single_day_range_passes() {
        let mut input = valid_input();
        input.end_date = input.start_date;
        let validated = validator().validate_submission(&input).unwrap();
        assert_eq!(validated.range.total_days(), 1);
    }

    #[test]
    fn test_unknown_leave_type_fails() {
        let mut input = valid_input();
        input.leave_type = Some("Sabbatical".to_string());
        assert_validation(validator().validate_submission(&input), UNKNOWN_LEAVE_TYPE);
    }

    #[test]
    fn test_unknown_employee_fails() {
        let mut input = valid_input();
        input.employee_id = Some("emp_404".to_string());
        assert_validation(validator().validate_submission(&input), UNKNOWN_EMPLOYEE);
    }

    #[test]
    fn test_reject_requires_notes() {
        assert_eq!(
            validate_transition_notes(Decision::Reject, None),
            Err(LeaveError::validation(REJECTION_REASON_REQUIRED))
        );
        assert_eq!(
            validate_transition_notes(Decision::Reject, Some("   ")),
            Err(LeaveError::validation(REJECTION_REASON_REQUIRED))
        );
        assert!(validate_transition_notes(Decision::Reject, Some("x")).is_ok());
    }

    #[test]
    fn test_approve_notes_optional() {
        assert!(validate_transition_notes(Decision::Approve, None).is_ok());
        assert!(validate_transition_notes(Decision::Approve, Some("")).is_ok());
    }
}
