//! Person model and role types.
//!
//! This module defines the Person struct and Role enum for representing
//! staff members and students in the attendance system.

use serde::{Deserialize, Serialize};

/// Represents the role of a person in the organization.
///
/// Roles determine which locations and operations a caller may use;
/// the rules live in [`crate::access`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// General staff member: may clock themselves in and out.
    #[serde(rename = "staff")]
    Staff,
    /// Tutor: same attendance privileges as staff.
    #[serde(rename = "tutor")]
    Tutor,
    /// Student: check-in/check-out only, no hours accounting.
    #[serde(rename = "student")]
    Student,
    /// Junior project manager: runs the roster panel for assigned locations.
    #[serde(rename = "juniorPM")]
    JuniorPm,
    /// Senior project manager: additionally approves payroll for
    /// assigned locations.
    #[serde(rename = "seniorPM")]
    SeniorPm,
    /// Administrator: full visibility across every location.
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Returns the wire-format name of this role (e.g. `"seniorPM"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Tutor => "tutor",
            Role::Student => "student",
            Role::JuniorPm => "juniorPM",
            Role::SeniorPm => "seniorPM",
            Role::Admin => "admin",
        }
    }

    /// Returns true for roles that appear on a staff roster and hold a
    /// [`crate::models::ClockState`].
    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Student)
    }
}

/// Represents a staff member or student known to the directory.
///
/// Persons are created by the external identity/directory service and
/// are immutable from the engine's perspective; only their clock state
/// (owned by the trackers) changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier issued by the directory service.
    pub id: String,
    /// The person's first name.
    pub first_name: String,
    /// The person's last name.
    pub last_name: String,
    /// The person's role.
    pub role: Role,
    /// Locations the person is assigned to; the first entry is the home
    /// location. Admins are treated as assigned to every location
    /// regardless of this list.
    #[serde(default)]
    pub locations: Vec<String>,
}

impl Person {
    /// Returns the person's display name as "First Last".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the person is assigned to the given location.
    ///
    /// Admins belong to every location.
    pub fn is_at(&self, location: &str) -> bool {
        self.role == Role::Admin || self.locations.iter().any(|l| l == location)
    }
}
