//! Payroll approval state models.
//!
//! This module defines the per-location approval state machine data and
//! the admin notification record emitted once every location approves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approval status of one location's payroll for the current cycle.
///
/// Two states: `Pending` (initial) and `Approved` (terminal for the
/// cycle). The only transition is `Pending → Approved`; the status never
/// reverts except through the external payroll-cycle rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting approval from the location's senior PM.
    Pending,
    /// Approved for the current pay cycle.
    Approved,
}

/// Payroll approval state for one physical location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPayrollStatus {
    /// The location key.
    pub location: String,
    /// Current approval status.
    pub status: ApprovalStatus,
    /// When the location was approved, if it has been.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

impl LocationPayrollStatus {
    /// Returns the initial (pending) status for a location.
    pub fn pending(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            status: ApprovalStatus::Pending,
            approved_at: None,
        }
    }

    /// Returns true once the location has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }
}

/// The administrator notification emitted when every scoped location
/// has approved its payroll.
///
/// Modeled as an explicit, auditable event with an id rather than a
/// fire-and-forget side effect; the sink that delivers it reports
/// success or failure back to the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminNotification {
    /// Unique id for this notification.
    pub id: Uuid,
    /// The locations covered by the all-approved evaluation.
    pub locations: Vec<String>,
    /// When the notification was emitted.
    pub sent_at: DateTime<Utc>,
}
