//! Leave request lifecycle and balance accounting engine.
//!
//! Employees submit leave requests, administrators approve or reject them,
//! and approved days are debited from a per-employee, per-leave-type ledger.
//! [`workflow::LeaveWorkflow`] is the single writer of both the request
//! collection and the ledger; [`query`] provides the read-only filtering,
//! pagination and selection used to drive bulk actions.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use leave_engine::config::PolicyLoader;
//! use leave_engine::models::{Decision, SubmissionInput};
//! use leave_engine::workflow::LeaveWorkflow;
//! use chrono::NaiveDate;
//!
//! let config = PolicyLoader::load("./config/default")?.into_config();
//! let workflow = LeaveWorkflow::new(Arc::new(config));
//!
//! let request = workflow.submit(&SubmissionInput {
//!     employee_id: Some("emp_001".to_string()),
//!     leave_type: Some("Annual Leave".to_string()),
//!     start_date: NaiveDate::from_ymd_opt(2026, 4, 6),
//!     end_date: NaiveDate::from_ymd_opt(2026, 4, 10),
//!     ..Default::default()
//! })?;
//! let approved = workflow.decide(&request.id, Decision::Approve, None)?;
//! assert_eq!(approved.total_days(), 5);
//! # Ok::<(), leave_engine::error::LeaveError>(())
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod query;
mod store;
pub mod validation;
pub mod workflow;
