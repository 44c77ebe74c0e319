//! Staff attendance tracking.
//!
//! This module implements the clock-in/clock-out state machine for
//! staff members: two states per person (OUT and IN), with hours
//! accumulating on each completed IN→OUT transition.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::directory::Directory;
use crate::error::{EngineError, EngineResult};
use crate::models::{ClockAction, ClockEvent, ClockState, Person, RosterEntry};

use super::events::ClockEventSink;

/// Tracks the current clock state of every staff person.
///
/// The tracker exclusively owns all [`ClockState`] values. Each person's
/// state sits behind its own mutex so concurrent requests for different
/// people never contend; two simultaneous clock-ins for the same person
/// serialize, and the loser observes `InvalidTransition` rather than a
/// lost update.
pub struct AttendanceTracker {
    directory: Arc<dyn Directory>,
    events: Arc<dyn ClockEventSink>,
    states: RwLock<HashMap<String, Arc<Mutex<ClockState>>>>,
}

impl AttendanceTracker {
    /// Creates a tracker over the given directory and event sink.
    ///
    /// Every person starts in the OUT state with zero accumulated hours.
    pub fn new(directory: Arc<dyn Directory>, events: Arc<dyn ClockEventSink>) -> Self {
        Self {
            directory,
            events,
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Clocks a staff person in at the given location.
    ///
    /// The person must exist on the location's roster and be clocked
    /// out. Returns the updated roster entry.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the person is not on the roster
    ///   at that location.
    /// - [`EngineError::InvalidTransition`] if the person is already
    ///   clocked in; the earlier clock-in is left untouched.
    pub fn clock_in(&self, person_id: &str, location: &str) -> EngineResult<RosterEntry> {
        self.clock_in_at(person_id, location, Utc::now())
    }

    /// Clocks a person in with an explicit timestamp.
    ///
    /// The public [`clock_in`](Self::clock_in) delegates here with the
    /// current time; tests inject timestamps to make elapsed-time
    /// arithmetic deterministic.
    pub fn clock_in_at(
        &self,
        person_id: &str,
        location: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<RosterEntry> {
        let person = self.roster_person(person_id, location)?;
        let entry = self.entry(person_id)?;
        let mut state = entry.lock().map_err(|_| lock_poisoned())?;

        if state.checked_in {
            warn!(person_id, location, "rejected duplicate clock-in");
            return Err(EngineError::InvalidTransition {
                person_id: person_id.to_string(),
                message: "already clocked in".to_string(),
            });
        }

        // Guards passed: emit the audit record, then mutate. A failed
        // sink aborts with no state change.
        self.events.record(ClockEvent {
            person_id: person_id.to_string(),
            location: location.to_string(),
            action: ClockAction::ClockIn,
            timestamp: now,
        })?;

        state.checked_in = true;
        state.last_event = Some(now);

        info!(person_id, location, "clocked in");
        Ok(roster_entry(&person, &state))
    }

    /// Clocks a staff person out at the given location.
    ///
    /// The person must be clocked in. The elapsed time since the
    /// matching clock-in (clamped at zero) is added to the person's
    /// accumulated hours for the week.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the person is not on the roster
    ///   at that location.
    /// - [`EngineError::InvalidTransition`] if the person is not
    ///   clocked in; accumulated hours are left unchanged.
    pub fn clock_out(&self, person_id: &str, location: &str) -> EngineResult<RosterEntry> {
        self.clock_out_at(person_id, location, Utc::now())
    }

    /// Clocks a person out with an explicit timestamp.
    pub fn clock_out_at(
        &self,
        person_id: &str,
        location: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<RosterEntry> {
        let person = self.roster_person(person_id, location)?;
        let entry = self.entry(person_id)?;
        let mut state = entry.lock().map_err(|_| lock_poisoned())?;

        if !state.checked_in {
            warn!(person_id, location, "rejected clock-out while clocked out");
            return Err(EngineError::InvalidTransition {
                person_id: person_id.to_string(),
                message: "not clocked in".to_string(),
            });
        }

        self.events.record(ClockEvent {
            person_id: person_id.to_string(),
            location: location.to_string(),
            action: ClockAction::ClockOut,
            timestamp: now,
        })?;

        let worked = match state.last_event {
            Some(since) => ClockState::elapsed_hours(since, now),
            None => Decimal::ZERO,
        };
        state.checked_in = false;
        state.last_event = Some(now);
        state.accumulated_hours += worked;

        info!(person_id, location, hours = %worked, "clocked out");
        Ok(roster_entry(&person, &state))
    }

    /// Applies a clock action to a person identified by exact first and
    /// last name instead of id.
    ///
    /// This is the administrative correction path for missed punches.
    /// The name must match exactly one staff person; zero or multiple
    /// matches are rejected with [`EngineError::NotFound`] rather than
    /// guessing between duplicates. The usual transition rules then
    /// apply.
    pub fn manual_entry(
        &self,
        first_name: &str,
        last_name: &str,
        action: ClockAction,
        location: &str,
    ) -> EngineResult<RosterEntry> {
        self.manual_entry_at(first_name, last_name, action, location, Utc::now())
    }

    /// Manual entry with an explicit timestamp.
    pub fn manual_entry_at(
        &self,
        first_name: &str,
        last_name: &str,
        action: ClockAction,
        location: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<RosterEntry> {
        let matches = self.directory.find_staff_by_name(first_name, last_name)?;
        let person = match matches.as_slice() {
            [person] => person.clone(),
            [] => {
                warn!(first_name, last_name, "manual entry: no name match");
                return Err(EngineError::NotFound {
                    what: format!("staff member named '{first_name} {last_name}'"),
                });
            }
            _ => {
                warn!(first_name, last_name, "manual entry: ambiguous name match");
                return Err(EngineError::NotFound {
                    what: format!(
                        "unique staff member named '{first_name} {last_name}' ({} matches)",
                        matches.len()
                    ),
                });
            }
        };

        match action {
            ClockAction::ClockIn => self.clock_in_at(&person.id, location, now),
            ClockAction::ClockOut => self.clock_out_at(&person.id, location, now),
        }
    }

    /// Returns the current clock state of every staff person at a
    /// location, ordered by (last, first) name.
    pub fn roster(&self, location: &str) -> EngineResult<Vec<RosterEntry>> {
        let staff = self.directory.staff_at(location)?;
        let mut entries = Vec::with_capacity(staff.len());
        for person in &staff {
            let state = self.snapshot(&person.id)?;
            entries.push(roster_entry(person, &state));
        }
        Ok(entries)
    }

    /// Returns a copy of one person's current clock state.
    ///
    /// Persons with no recorded activity report the initial OUT state.
    pub fn snapshot(&self, person_id: &str) -> EngineResult<ClockState> {
        let states = self.states.read().map_err(|_| lock_poisoned())?;
        match states.get(person_id) {
            Some(entry) => {
                let state = entry.lock().map_err(|_| lock_poisoned())?;
                Ok(state.clone())
            }
            None => Ok(ClockState::new()),
        }
    }

    /// Zeroes every person's accumulated hours.
    ///
    /// Payroll-cycle rollover hook; invoked by the integrating system's
    /// scheduler at the start of each pay week. Clock-in status is left
    /// as is so a shift spanning the rollover is not cut short.
    pub fn reset_week(&self) -> EngineResult<()> {
        let states = self.states.read().map_err(|_| lock_poisoned())?;
        for entry in states.values() {
            let mut state = entry.lock().map_err(|_| lock_poisoned())?;
            state.accumulated_hours = Decimal::ZERO;
        }
        info!("weekly hours reset");
        Ok(())
    }

    /// Validates that the person exists, holds a staff role, and is
    /// assigned to the location.
    fn roster_person(&self, person_id: &str, location: &str) -> EngineResult<Person> {
        let person = self
            .directory
            .person(person_id)?
            .ok_or_else(|| EngineError::person_not_found(person_id))?;
        if !person.role.is_staff() || !person.is_at(location) {
            return Err(EngineError::NotFound {
                what: format!("person '{person_id}' on the roster at '{location}'"),
            });
        }
        Ok(person)
    }

    /// Returns the per-person state cell, creating the initial OUT
    /// state on first use.
    fn entry(&self, person_id: &str) -> EngineResult<Arc<Mutex<ClockState>>> {
        {
            let states = self.states.read().map_err(|_| lock_poisoned())?;
            if let Some(entry) = states.get(person_id) {
                return Ok(Arc::clone(entry));
            }
        }
        let mut states = self.states.write().map_err(|_| lock_poisoned())?;
        Ok(Arc::clone(
            states.entry(person_id.to_string()).or_default(),
        ))
    }
}

fn roster_entry(person: &Person, state: &ClockState) -> RosterEntry {
    RosterEntry {
        id: person.id.clone(),
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        checked_in: state.checked_in,
        accumulated_hours: state.accumulated_hours,
    }
}

fn lock_poisoned() -> EngineError {
    EngineError::Unavailable {
        message: "clock state lock poisoned".to_string(),
    }
}
