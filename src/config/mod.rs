//! Leave policy configuration and collaborator lookups.
//!
//! This module loads the leave type allow-list, default allotments and the
//! employee directory from YAML, and defines the traits through which the
//! engine consults them.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::PolicyLoader;
//!
//! let config = PolicyLoader::load("./config/default").unwrap().into_config();
//! println!("Loaded policy: {}", config.metadata().name);
//! ```

mod loader;
mod policy;
mod types;

pub use loader::PolicyLoader;
pub use policy::{AllotmentPolicy, EmployeeDirectory};
pub use types::{
    AllotmentOverride, EmployeesFile, LeaveConfig, LeaveTypePolicy, PolicyFile, PolicyMetadata,
};
