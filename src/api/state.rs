//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::access::RoleRouter;
use crate::attendance::{AttendanceTracker, ClockEventSink, StudentTracker};
use crate::config::ConfigLoader;
use crate::directory::Directory;
use crate::payroll::{ApprovalCoordinator, NotificationSink};

/// Shared application state.
///
/// Owns the trackers and coordinator and wires them to the directory,
/// event sink, and notification sink the embedding provides.
#[derive(Clone)]
pub struct AppState {
    directory: Arc<dyn Directory>,
    tracker: Arc<AttendanceTracker>,
    students: Arc<StudentTracker>,
    coordinator: Arc<ApprovalCoordinator>,
    router: Arc<RoleRouter>,
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates the application state.
    ///
    /// The approval coordinator is seeded with the configuration's full
    /// location list, each starting the cycle as Pending.
    pub fn new(
        config: ConfigLoader,
        directory: Arc<dyn Directory>,
        events: Arc<dyn ClockEventSink>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        let locations = config.config().locations().to_vec();
        let tracker = Arc::new(AttendanceTracker::new(Arc::clone(&directory), events));
        let students = Arc::new(StudentTracker::new(Arc::clone(&directory)));
        let coordinator = Arc::new(ApprovalCoordinator::new(
            locations.clone(),
            notifications,
        ));
        let router = Arc::new(RoleRouter::new(locations));
        Self {
            directory,
            tracker,
            students,
            coordinator,
            router,
            config: Arc::new(config),
        }
    }

    /// Returns the directory.
    pub fn directory(&self) -> &Arc<dyn Directory> {
        &self.directory
    }

    /// Returns the staff attendance tracker.
    pub fn tracker(&self) -> &AttendanceTracker {
        &self.tracker
    }

    /// Returns the student attendance tracker.
    pub fn students(&self) -> &StudentTracker {
        &self.students
    }

    /// Returns the payroll approval coordinator.
    pub fn coordinator(&self) -> &ApprovalCoordinator {
        &self.coordinator
    }

    /// Returns the role router.
    pub fn router(&self) -> &RoleRouter {
        &self.router
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
