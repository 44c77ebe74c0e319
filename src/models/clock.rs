//! Clock state and clock event models.
//!
//! This module defines the per-person clock state machine data used by
//! the staff and student attendance trackers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The direction of a clock action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockAction {
    /// Start of a shift.
    ClockIn,
    /// End of a shift.
    ClockOut,
}

/// Current clock state for a staff person.
///
/// Two states: OUT (`checked_in == false`, the initial state) and IN.
/// Clock-in is only valid from OUT; clock-out is only valid from IN.
/// Hours accumulate on clock-out and are zeroed at the start of each
/// payroll period by an external rollover trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockState {
    /// Whether the person is currently clocked in.
    pub checked_in: bool,
    /// Timestamp of the most recent clock event.
    pub last_event: Option<DateTime<Utc>>,
    /// Hours accumulated so far this pay week, to two decimal places.
    pub accumulated_hours: Decimal,
}

impl ClockState {
    /// Returns the initial (clocked-out) state.
    pub fn new() -> Self {
        Self {
            checked_in: false,
            last_event: None,
            accumulated_hours: Decimal::ZERO,
        }
    }

    /// Converts an elapsed duration since the matching clock-in into
    /// hours, rounded to two decimal places and clamped at zero.
    ///
    /// Clamping guards against clock skew producing a negative elapsed
    /// time; a skewed clock-out then contributes nothing rather than
    /// subtracting hours.
    pub fn elapsed_hours(since: DateTime<Utc>, now: DateTime<Utc>) -> Decimal {
        let seconds = (now - since).num_seconds().max(0);
        let hours = Decimal::from(seconds) / Decimal::from(3600);
        hours.round_dp(2)
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

/// Current check state for a student.
///
/// Same two-state guard as [`ClockState`] but with no hours accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckState {
    /// Whether the student is currently checked in.
    pub checked_in: bool,
}

/// An audit record of a single clock action.
///
/// Emitted by the attendance tracker on every successful transition so
/// hours accounting and payroll reporting can be reconstructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// The person the event applies to.
    pub person_id: String,
    /// The location where the action was taken.
    pub location: String,
    /// Whether this was a clock-in or clock-out.
    pub action: ClockAction,
    /// When the action was recorded.
    pub timestamp: DateTime<Utc>,
}

/// A roster projection row: one person's identity plus clock state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// The person's unique id.
    pub id: String,
    /// The person's first name.
    pub first_name: String,
    /// The person's last name.
    pub last_name: String,
    /// Whether the person is currently clocked in.
    pub checked_in: bool,
    /// Hours accumulated so far this pay week.
    pub accumulated_hours: Decimal,
}

/// A student attendance projection row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckEntry {
    /// The student's unique id.
    pub id: String,
    /// The student's first name.
    pub first_name: String,
    /// The student's last name.
    pub last_name: String,
    /// Whether the student is currently checked in.
    pub checked_in: bool,
}
