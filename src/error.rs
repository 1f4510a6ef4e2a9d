//! Error types for the leave engine.
//!
//! Every workflow, ledger and configuration operation returns [`LeaveError`]
//! through [`LeaveResult`]. None of these errors are fatal: the caller decides
//! how to present them, and the engine's state stays consistent after any of
//! them is returned.

use thiserror::Error;

use crate::models::LeaveStatus;

/// The main error type for the leave engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::LeaveError;
///
/// let error = LeaveError::validation("missing required field");
/// assert_eq!(error.to_string(), "Validation failed: missing required field");
/// assert_eq!(error.code(), "VALIDATION_ERROR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveError {
    /// Input was rejected; the caller corrects it and resubmits.
    #[error("Validation failed: {message}")]
    Validation {
        /// A description of what was wrong with the input.
        message: String,
    },

    /// The referenced leave request does not exist (or no longer exists).
    #[error("Leave request not found: {id}")]
    NotFound {
        /// The id that could not be resolved.
        id: String,
    },

    /// The request is not in a state that allows the operation.
    #[error("Leave request '{id}' is {status}, expected pending")]
    InvalidState {
        /// The id of the request.
        id: String,
        /// The status the request was found in.
        status: LeaveStatus,
    },

    /// Approving would take the employee's balance below zero.
    #[error(
        "Insufficient balance for '{employee_id}' ({leave_type}): requested {requested} day(s), {remaining} remaining"
    )]
    InsufficientBalance {
        /// The employee whose balance was checked.
        employee_id: String,
        /// The leave type of the balance.
        leave_type: String,
        /// The number of days the operation asked for.
        requested: u32,
        /// The number of days left on the balance.
        remaining: u32,
    },

    /// The ledger would have been driven into an impossible state.
    #[error("Ledger inconsistency for '{employee_id}' ({leave_type}): {message}")]
    LedgerInconsistency {
        /// The employee whose ledger entry is inconsistent.
        employee_id: String,
        /// The leave type of the ledger entry.
        leave_type: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl LeaveError {
    /// Shorthand for a [`LeaveError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`LeaveError::NotFound`].
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// A stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::LedgerInconsistency { .. } => "LEDGER_INCONSISTENCY",
            Self::ConfigNotFound { .. } | Self::ConfigParseError { .. } => "CONFIG_ERROR",
        }
    }

    /// Returns true if the caller can recover by correcting input or refreshing state.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::LedgerInconsistency { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
        )
    }
}

/// A type alias for Results that return LeaveError.
pub type LeaveResult<T> = Result<T, LeaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_message() {
        let error = LeaveError::validation("invalid date range");
        assert_eq!(error.to_string(), "Validation failed: invalid date range");
    }

    #[test]
    fn test_not_found_displays_id() {
        let error = LeaveError::not_found("req_missing");
        assert_eq!(error.to_string(), "Leave request not found: req_missing");
    }

    #[test]
    fn test_invalid_state_displays_status() {
        let error = LeaveError::InvalidState {
            id: "req_001".to_string(),
            status: LeaveStatus::Approved,
        };
        assert_eq!(
            error.to_string(),
            "Leave request 'req_001' is approved, expected pending"
        );
    }

    #[test]
    fn test_insufficient_balance_displays_days() {
        let error = LeaveError::InsufficientBalance {
            employee_id: "emp_001".to_string(),
            leave_type: "Annual Leave".to_string(),
            requested: 5,
            remaining: 2,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient balance for 'emp_001' (Annual Leave): requested 5 day(s), 2 remaining"
        );
    }

    #[test]
    fn test_config_errors_share_a_code() {
        let missing = LeaveError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        let parse = LeaveError::ConfigParseError {
            path: "/bad/policy.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(missing.code(), "CONFIG_ERROR");
        assert_eq!(parse.code(), "CONFIG_ERROR");
        assert_eq!(
            parse.to_string(),
            "Failed to parse configuration file '/bad/policy.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_ledger_inconsistency_is_not_recoverable() {
        let error = LeaveError::LedgerInconsistency {
            employee_id: "emp_001".to_string(),
            leave_type: "Sick Leave".to_string(),
            message: "credit of 3 day(s) exceeds 1 used".to_string(),
        };
        assert!(!error.is_recoverable());
        assert!(LeaveError::validation("x").is_recoverable());
        assert!(LeaveError::not_found("x").is_recoverable());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<LeaveError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> LeaveResult<()> {
            Err(LeaveError::not_found("req_001"))
        }

        fn propagates_error() -> LeaveResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert_eq!(
            propagates_error(),
            Err(LeaveError::not_found("req_001"))
        );
    }
}
