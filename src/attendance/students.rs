//! Student attendance tracking.
//!
//! A simpler mirror of the staff tracker: the same two-state
//! check-in/check-out guard per student, with no hours accounting.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{info, warn};

use crate::directory::Directory;
use crate::error::{EngineError, EngineResult};
use crate::models::{CheckEntry, CheckState, Person, Role};

/// Tracks the current check state of every student.
///
/// Per-student entries sit behind their own mutex, matching the
/// concurrency discipline of [`crate::attendance::AttendanceTracker`].
pub struct StudentTracker {
    directory: Arc<dyn Directory>,
    states: RwLock<HashMap<String, Arc<Mutex<CheckState>>>>,
}

impl StudentTracker {
    /// Creates a tracker over the given directory.
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self {
            directory,
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Checks a student in at the given location.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the id is not a student at that
    ///   location.
    /// - [`EngineError::InvalidTransition`] if already checked in.
    pub fn check_in(&self, student_id: &str, location: &str) -> EngineResult<CheckEntry> {
        let student = self.student(student_id, location)?;
        let entry = self.entry(student_id)?;
        let mut state = entry.lock().map_err(|_| lock_poisoned())?;

        if state.checked_in {
            warn!(student_id, location, "rejected duplicate check-in");
            return Err(EngineError::InvalidTransition {
                person_id: student_id.to_string(),
                message: "already checked in".to_string(),
            });
        }
        state.checked_in = true;

        info!(student_id, location, "student checked in");
        Ok(check_entry(&student, &state))
    }

    /// Checks a student out at the given location.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the id is not a student at that
    ///   location.
    /// - [`EngineError::InvalidTransition`] if not checked in.
    pub fn check_out(&self, student_id: &str, location: &str) -> EngineResult<CheckEntry> {
        let student = self.student(student_id, location)?;
        let entry = self.entry(student_id)?;
        let mut state = entry.lock().map_err(|_| lock_poisoned())?;

        if !state.checked_in {
            warn!(student_id, location, "rejected check-out while checked out");
            return Err(EngineError::InvalidTransition {
                person_id: student_id.to_string(),
                message: "not checked in".to_string(),
            });
        }
        state.checked_in = false;

        info!(student_id, location, "student checked out");
        Ok(check_entry(&student, &state))
    }

    /// Returns the current check state of every student at a location,
    /// ordered by (last, first) name.
    pub fn attendance(&self, location: &str) -> EngineResult<Vec<CheckEntry>> {
        let students = self.directory.students_at(location)?;
        let mut entries = Vec::with_capacity(students.len());
        for student in &students {
            let state = self.snapshot(&student.id)?;
            entries.push(check_entry(student, &state));
        }
        Ok(entries)
    }

    /// Returns the number of students currently checked in at a
    /// location.
    pub fn present_count(&self, location: &str) -> EngineResult<usize> {
        Ok(self
            .attendance(location)?
            .iter()
            .filter(|e| e.checked_in)
            .count())
    }

    /// Returns a copy of one student's current check state.
    pub fn snapshot(&self, student_id: &str) -> EngineResult<CheckState> {
        let states = self.states.read().map_err(|_| lock_poisoned())?;
        match states.get(student_id) {
            Some(entry) => {
                let state = entry.lock().map_err(|_| lock_poisoned())?;
                Ok(*state)
            }
            None => Ok(CheckState::default()),
        }
    }

    fn student(&self, student_id: &str, location: &str) -> EngineResult<Person> {
        let person = self
            .directory
            .person(student_id)?
            .ok_or_else(|| EngineError::person_not_found(student_id))?;
        if person.role != Role::Student || !person.is_at(location) {
            return Err(EngineError::NotFound {
                what: format!("student '{student_id}' at '{location}'"),
            });
        }
        Ok(person)
    }

    fn entry(&self, student_id: &str) -> EngineResult<Arc<Mutex<CheckState>>> {
        {
            let states = self.states.read().map_err(|_| lock_poisoned())?;
            if let Some(entry) = states.get(student_id) {
                return Ok(Arc::clone(entry));
            }
        }
        let mut states = self.states.write().map_err(|_| lock_poisoned())?;
        Ok(Arc::clone(
            states.entry(student_id.to_string()).or_default(),
        ))
    }
}

fn check_entry(student: &Person, state: &CheckState) -> CheckEntry {
    CheckEntry {
        id: student.id.clone(),
        first_name: student.first_name.clone(),
        last_name: student.last_name.clone(),
        checked_in: state.checked_in,
    }
}

fn lock_poisoned() -> EngineError {
    EngineError::Unavailable {
        message: "check state lock poisoned".to_string(),
    }
}
