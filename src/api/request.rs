//! Request types for the attendance engine API.
//!
//! Every request carries an `actor_id`: the authenticated caller's
//! person id as issued by the external identity service. The engine
//! re-derives the caller's role and scope from the directory on every
//! request instead of trusting role claims in the body.

use serde::{Deserialize, Serialize};

use crate::models::ClockAction;

/// Body for `POST /clock-in` and `POST /clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The staff person being clocked in or out.
    pub person_id: String,
    /// The location where the action is taken.
    pub location: String,
    /// The authenticated caller.
    pub actor_id: String,
}

/// Body for `POST /manual-entry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualEntryRequest {
    /// First name of the person to correct, matched exactly.
    pub first_name: String,
    /// Last name of the person to correct, matched exactly.
    pub last_name: String,
    /// Whether to apply a clock-in or a clock-out.
    pub action: ClockAction,
    /// The location where the correction applies.
    pub location: String,
    /// The authenticated caller.
    pub actor_id: String,
}

/// Body for `POST /students/check-in` and `POST /students/check-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCheckRequest {
    /// The student being checked in or out.
    pub student_id: String,
    /// The location where attendance is taken.
    pub location: String,
    /// The authenticated caller.
    pub actor_id: String,
}

/// Body for `POST /payroll/approve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveRequest {
    /// The location whose payroll is being approved.
    pub location: String,
    /// The authenticated caller.
    pub actor_id: String,
}

/// Body for `POST /payroll/notify-admin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyAdminRequest {
    /// The authenticated caller.
    pub actor_id: String,
}

/// Query parameters for the read-only GET endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorQuery {
    /// The authenticated caller.
    pub actor_id: String,
}
