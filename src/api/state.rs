//! Application state for the shift scheduler API.

use std::sync::Arc;

use crate::scheduling::ShiftScheduler;

/// Shared application state.
///
/// Holds the scheduler every handler delegates to.
#[derive(Clone)]
pub struct AppState {
    scheduler: Arc<ShiftScheduler>,
}

impl AppState {
    /// Creates a new application state around `scheduler`.
    pub fn new(scheduler: ShiftScheduler) -> Self {
        Self {
            scheduler: Arc::new(scheduler),
        }
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &ShiftScheduler {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Required for axum state
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
