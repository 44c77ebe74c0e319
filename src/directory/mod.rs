//! Roster directory boundary.
//!
//! The directory is the external identity service that owns person
//! records. The engine consumes it read-only through the [`Directory`]
//! trait; [`InMemoryDirectory`] backs tests and embeddings that load a
//! roster up front.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{Person, Role};

/// Read-only access to the organization's person records.
///
/// Implementations translate their own failures into
/// [`EngineError::Unavailable`]; every other error the engine produces
/// itself.
pub trait Directory: Send + Sync {
    /// Looks up a person by id.
    fn person(&self, id: &str) -> EngineResult<Option<Person>>;

    /// Returns all staff-roster persons assigned to a location
    /// (everyone except students; admins appear at every location).
    fn staff_at(&self, location: &str) -> EngineResult<Vec<Person>>;

    /// Returns all students assigned to a location.
    fn students_at(&self, location: &str) -> EngineResult<Vec<Person>>;

    /// Returns staff persons whose first and last name both match
    /// exactly. Used by the manual-entry correction path; the caller is
    /// responsible for rejecting non-unique results.
    fn find_staff_by_name(&self, first_name: &str, last_name: &str) -> EngineResult<Vec<Person>>;

    /// Returns all administrators (the recipients of payroll
    /// notifications).
    fn admins(&self) -> EngineResult<Vec<Person>>;
}

/// An in-memory [`Directory`] backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryDirectory {
    people: RwLock<HashMap<String, Person>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with the given persons.
    pub fn with_people(people: impl IntoIterator<Item = Person>) -> Self {
        let map = people.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            people: RwLock::new(map),
        }
    }

    /// Adds or replaces a person record.
    pub fn insert(&self, person: Person) -> EngineResult<()> {
        let mut people = self.people.write().map_err(|_| EngineError::Unavailable {
            message: "directory lock poisoned".to_string(),
        })?;
        people.insert(person.id.clone(), person);
        Ok(())
    }

    fn filtered(&self, predicate: impl Fn(&Person) -> bool) -> EngineResult<Vec<Person>> {
        let people = self
            .people
            .read()
            .map_err(|_| EngineError::Unavailable {
                message: "directory lock poisoned".to_string(),
            })?;
        let mut matches: Vec<Person> = people.values().filter(|p| predicate(p)).cloned().collect();
        matches.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(matches)
    }
}

impl Directory for InMemoryDirectory {
    fn person(&self, id: &str) -> EngineResult<Option<Person>> {
        let people = self
            .people
            .read()
            .map_err(|_| EngineError::Unavailable {
                message: "directory lock poisoned".to_string(),
            })?;
        Ok(people.get(id).cloned())
    }

    fn staff_at(&self, location: &str) -> EngineResult<Vec<Person>> {
        self.filtered(|p| p.role.is_staff() && p.is_at(location))
    }

    fn students_at(&self, location: &str) -> EngineResult<Vec<Person>> {
        self.filtered(|p| p.role == Role::Student && p.is_at(location))
    }

    fn find_staff_by_name(&self, first_name: &str, last_name: &str) -> EngineResult<Vec<Person>> {
        self.filtered(|p| {
            p.role.is_staff() && p.first_name == first_name && p.last_name == last_name
        })
    }

    fn admins(&self) -> EngineResult<Vec<Person>> {
        self.filtered(|p| p.role == Role::Admin)
    }
}
