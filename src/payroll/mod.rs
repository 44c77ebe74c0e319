//! Payroll approval workflow.
//!
//! This module owns per-location approval status for the current pay
//! cycle and the notification sink through which the administrator is
//! told that every location has approved.

mod coordinator;
mod notify;

pub use coordinator::ApprovalCoordinator;
pub use notify::{InMemoryNotifier, NotificationSink};
