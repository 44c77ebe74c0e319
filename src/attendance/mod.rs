//! Attendance tracking for staff and students.
//!
//! This module owns all clock and check state: the staff tracker with
//! hours accumulation, the simpler student tracker, and the event sink
//! that receives the audit record of every successful transition.

mod events;
mod students;
mod tracker;

pub use events::{ClockEventSink, InMemoryEventLog};
pub use students::StudentTracker;
pub use tracker::AttendanceTracker;
