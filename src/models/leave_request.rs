//! Leave request entity and its lifecycle vocabulary.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::LeaveError;

use super::date_range::DateRange;
use super::employee::EmployeeId;

/// Identifier of a leave request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh, unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A leave type tag such as "Annual Leave".
///
/// The set of leave types is policy-configured, so this is a string tag
/// checked against the allow-list at submission rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveType(pub String);

impl LeaveType {
    /// Creates a leave type tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a leave request.
///
/// `Approved` and `Rejected` are terminal: the only way out is deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting an administrator decision.
    Pending,
    /// Approved; the balance has been debited.
    Approved,
    /// Rejected with a reason.
    Rejected,
}

impl LeaveStatus {
    /// All statuses in display order.
    pub const ALL: [LeaveStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// The lowercase wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true for `Approved` and `Rejected`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = LeaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(LeaveError::validation(format!("unknown status: {other}"))),
        }
    }
}

/// An administrator's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Approve and debit the balance.
    Approve,
    /// Reject; requires a reason.
    Reject,
}

impl Decision {
    /// The status a request moves to under this decision.
    pub fn target_status(&self) -> LeaveStatus {
        match self {
            Self::Approve => LeaveStatus::Approved,
            Self::Reject => LeaveStatus::Rejected,
        }
    }
}

/// Raw submission input, before validation.
///
/// Required fields are optional here so that a missing field is a
/// validation failure instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionInput {
    /// The submitting employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The requested leave type.
    #[serde(default)]
    pub leave_type: Option<String>,
    /// First day of leave.
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day of leave.
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub end_date: Option<NaiveDate>,
    /// Free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Reference to a supporting document held by external storage.
    #[serde(default)]
    pub document_ref: Option<String>,
}

/// Reads an optional date, treating a blank string as absent.
///
/// Form date inputs post `""` when left empty; that must surface as a
/// missing field rather than a parse failure.
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A single leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier.
    pub id: RequestId,
    /// The employee who submitted and owns the request.
    pub employee_id: EmployeeId,
    /// Employee display name resolved at submission.
    pub employee_name: String,
    /// The leave type whose balance the request draws on.
    pub leave_type: LeaveType,
    /// The requested days.
    pub range: DateRange,
    /// Optional reason given by the employee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Optional supporting document reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_ref: Option<String>,
    /// Current lifecycle state.
    pub status: LeaveStatus,
    /// Notes recorded with the administrator's decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the request was approved or rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Days requested, derived from the range.
    pub fn total_days(&self) -> u32 {
        self.range.total_days()
    }

    /// Returns true while the request awaits a decision.
    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> LeaveRequest {
        LeaveRequest {
            id: RequestId::new("req_001"),
            employee_id: EmployeeId::new("emp_001"),
            employee_name: "Amara Okafor".to_string(),
            leave_type: LeaveType::new("Annual Leave"),
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2026, 4, 6).unwrap(),
                NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
            ),
            reason: Some("Family trip".to_string()),
            document_ref: None,
            status: LeaveStatus::Pending,
            admin_notes: None,
            created_at: DateTime::parse_from_rfc3339("2026-03-01T09:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            decided_at: None,
        }
    }

    #[test]
    fn test_total_days_is_derived_from_range() {
        let request = sample_request();
        assert_eq!(request.total_days(), 5);
        assert!(request.is_pending());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Rejected).unwrap(),
            "\"rejected\""
        );
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("Approved".parse::<LeaveStatus>(), Ok(LeaveStatus::Approved));
        assert_eq!(" pending ".parse::<LeaveStatus>(), Ok(LeaveStatus::Pending));
        assert!(matches!(
            "cancelled".parse::<LeaveStatus>(),
            Err(LeaveError::Validation { .. })
        ));
    }

    #[test]
    fn test_decision_target_status() {
        assert_eq!(Decision::Approve.target_status(), LeaveStatus::Approved);
        assert_eq!(Decision::Reject.target_status(), LeaveStatus::Rejected);
        assert!(LeaveStatus::Rejected.is_terminal());
        assert!(!LeaveStatus::Pending.is_terminal());
    }

    #[test]
    fn test_serialize_skips_empty_optionals() {
        let mut request = sample_request();
        request.reason = None;
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("reason"));
        assert!(!json.contains("admin_notes"));
        assert!(json.contains("\"leave_type\":\"Annual Leave\""));
    }

    #[test]
    fn test_submission_input_tolerates_missing_fields() {
        let input: SubmissionInput = serde_json::from_str(r#"{"leave_type": "Sick Leave"}"#).unwrap();
        assert_eq!(input.leave_type.as_deref(), Some("Sick Leave"));
        assert!(input.employee_id.is_none());
        assert!(input.start_date.is_none());
    }

    #[test]
    fn test_submission_input_blank_dates_are_absent() {
        let input: SubmissionInput =
            serde_json::from_str(r#"{"start_date": "", "end_date": "  ", "leave_type": "Sick Leave"}"#)
                .unwrap();
        assert!(input.start_date.is_none());
        assert!(input.end_date.is_none());

        let input: SubmissionInput =
            serde_json::from_str(r#"{"start_date": "2026-04-06", "end_date": null}"#).unwrap();
        assert_eq!(input.start_date, NaiveDate::from_ymd_opt(2026, 4, 6));
        assert!(input.end_date.is_none());

        assert!(serde_json::from_str::<SubmissionInput>(r#"{"start_date": "next week"}"#).is_err());
    }
}
