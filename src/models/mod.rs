//! Core data models for the attendance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod approval;
mod clock;
mod person;

pub use approval::{AdminNotification, ApprovalStatus, LocationPayrollStatus};
pub use clock::{CheckEntry, CheckState, ClockAction, ClockEvent, ClockState, RosterEntry};
pub use person::{Person, Role};
