//! Application state for the leave API.

use std::sync::Arc;

use crate::config::LeaveConfig;
use crate::workflow::LeaveWorkflow;

/// Shared application state.
///
/// Handlers reach the request collection and ledger only through the
/// workflow held here.
#[derive(Clone)]
pub struct AppState {
    workflow: Arc<LeaveWorkflow>,
}

impl AppState {
    /// Wraps an existing workflow.
    pub fn new(workflow: LeaveWorkflow) -> Self {
        Self {
            workflow: Arc::new(workflow),
        }
    }

    /// Builds a workflow on the wall clock from a loaded configuration.
    pub fn from_config(config: LeaveConfig) -> Self {
        Self::new(LeaveWorkflow::new(Arc::new(config)))
    }

    /// Returns the workflow.
    pub fn workflow(&self) -> &LeaveWorkflow {
        &self.workflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone_and_shareable() {
        fn assert_state<T: Clone + Send + Sync + 'static>() {}
        assert_state::<AppState>();
    }
}
