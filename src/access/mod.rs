//! Role-based access control.
//!
//! The role router holds no state of its own: given an authenticated
//! person it resolves (a) the set of locations that person may view or
//! mutate and (b) which tracker/coordinator operations are permitted.
//! Every operation requested outside the caller's scope fails with
//! [`EngineError::Forbidden`].

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{Person, Role};

/// The operations a caller can request against the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Read the staff roster and clock states for a location.
    ViewRoster,
    /// Clock a staff person in or out.
    ClockStaff,
    /// Apply a clock correction identified by name.
    ManualEntry,
    /// Read student attendance for a location.
    ViewStudentAttendance,
    /// Check a student in or out.
    RecordStudentAttendance,
    /// Read payroll approval status for scoped locations.
    ViewApprovals,
    /// Approve a location's payroll.
    ApproveLocation,
    /// Emit the all-approved admin notification.
    NotifyAdmin,
}

impl Operation {
    /// Human-readable description used in `Forbidden` messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::ViewRoster => "view the staff roster",
            Operation::ClockStaff => "clock staff in or out",
            Operation::ManualEntry => "apply manual clock corrections",
            Operation::ViewStudentAttendance => "view student attendance",
            Operation::RecordStudentAttendance => "record student attendance",
            Operation::ViewApprovals => "view payroll approvals",
            Operation::ApproveLocation => "approve payroll",
            Operation::NotifyAdmin => "notify the administrator",
        }
    }
}

/// Resolves scopes and permissions from a person's role.
pub struct RoleRouter {
    all_locations: Vec<String>,
}

impl RoleRouter {
    /// Creates a router over the organization's full location list.
    pub fn new(all_locations: Vec<String>) -> Self {
        Self { all_locations }
    }

    /// Returns the locations the person may view or mutate.
    ///
    /// Admins see every location; everyone else sees only their
    /// assigned locations.
    pub fn scope(&self, person: &Person) -> Vec<String> {
        match person.role {
            Role::Admin => self.all_locations.clone(),
            _ => person
                .locations
                .iter()
                .filter(|l| self.all_locations.contains(l))
                .cloned()
                .collect(),
        }
    }

    /// Checks that the person's role permits the operation at all.
    pub fn authorize(&self, person: &Person, operation: Operation) -> EngineResult<()> {
        if role_permits(person.role, operation) {
            Ok(())
        } else {
            warn!(
                person_id = %person.id,
                role = person.role.as_str(),
                operation = operation.describe(),
                "operation refused"
            );
            Err(EngineError::Forbidden {
                role: person.role.as_str().to_string(),
                operation: operation.describe().to_string(),
            })
        }
    }

    /// Checks the operation and that the target location is inside the
    /// person's scope.
    pub fn authorize_at(
        &self,
        person: &Person,
        operation: Operation,
        location: &str,
    ) -> EngineResult<()> {
        self.authorize(person, operation)?;
        if self.scope(person).iter().any(|l| l == location) {
            Ok(())
        } else {
            warn!(
                person_id = %person.id,
                role = person.role.as_str(),
                location,
                "location outside caller scope"
            );
            Err(EngineError::Forbidden {
                role: person.role.as_str().to_string(),
                operation: format!("{} for '{location}'", operation.describe()),
            })
        }
    }

    /// Checks that a clock or check action may target the given person.
    ///
    /// Self-service roles (staff, tutor, student) may only act on
    /// themselves; PMs and admins may act on anyone in scope.
    pub fn authorize_target(
        &self,
        actor: &Person,
        operation: Operation,
        target_id: &str,
    ) -> EngineResult<()> {
        self.authorize(actor, operation)?;
        let self_only = matches!(actor.role, Role::Staff | Role::Tutor | Role::Student);
        if self_only && actor.id != target_id {
            warn!(
                actor_id = %actor.id,
                target_id,
                "self-service role targeting another person"
            );
            return Err(EngineError::Forbidden {
                role: actor.role.as_str().to_string(),
                operation: format!("{} for another person", operation.describe()),
            });
        }
        Ok(())
    }
}

/// The role/operation permission table.
fn role_permits(role: Role, operation: Operation) -> bool {
    use Operation::*;
    match role {
        Role::Admin | Role::SeniorPm => true,
        Role::JuniorPm => matches!(
            operation,
            ViewRoster
                | ClockStaff
                | ViewStudentAttendance
                | RecordStudentAttendance
                | ViewApprovals
                | ApproveLocation
                | NotifyAdmin
        ),
        Role::Staff | Role::Tutor => matches!(operation, ClockStaff),
        Role::Student => matches!(operation, RecordStudentAttendance),
    }
}
