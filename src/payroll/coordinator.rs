//! Payroll approval coordination.
//!
//! This module implements the per-location approval state machine and
//! the all-approved gate in front of the admin notification. Each
//! location is Pending or Approved for the current pay cycle; the
//! administrator is notified only once every location in the approver's
//! scope has approved.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{AdminNotification, ApprovalStatus, LocationPayrollStatus};

use super::notify::NotificationSink;

/// Coordinates per-location payroll approval for the current pay cycle.
///
/// The coordinator exclusively owns all [`LocationPayrollStatus`]
/// values. Each location's status sits behind its own mutex, so
/// approvals for different locations proceed fully in parallel; the
/// all-approved evaluation locks the scoped entries in key order to
/// read a consistent snapshot.
pub struct ApprovalCoordinator {
    sink: Arc<dyn NotificationSink>,
    statuses: RwLock<BTreeMap<String, Arc<Mutex<LocationPayrollStatus>>>>,
}

impl ApprovalCoordinator {
    /// Creates a coordinator seeded with the given locations, each
    /// starting the cycle as Pending.
    pub fn new(
        locations: impl IntoIterator<Item = String>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let statuses = locations
            .into_iter()
            .map(|location| {
                let status = LocationPayrollStatus::pending(location.clone());
                (location, Arc::new(Mutex::new(status)))
            })
            .collect();
        Self {
            sink,
            statuses: RwLock::new(statuses),
        }
    }

    /// Returns the approval status for exactly the requested locations.
    ///
    /// Locations outside the request are never included, so a
    /// location-scoped approver cannot see other locations' status.
    /// Requested keys the coordinator does not track are omitted.
    pub fn approvals(
        &self,
        scope: &[String],
    ) -> EngineResult<BTreeMap<String, LocationPayrollStatus>> {
        let statuses = self.statuses.read().map_err(|_| lock_poisoned())?;
        let mut result = BTreeMap::new();
        for location in scope {
            if let Some(entry) = statuses.get(location) {
                let status = entry.lock().map_err(|_| lock_poisoned())?;
                result.insert(location.clone(), status.clone());
            }
        }
        Ok(result)
    }

    /// Approves a location's payroll for the current cycle.
    ///
    /// Idempotent: approving an already-approved location succeeds with
    /// no state change, tolerating duplicate submissions from retried
    /// network calls.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] if the location is not tracked.
    pub fn approve(&self, location: &str) -> EngineResult<LocationPayrollStatus> {
        self.approve_at(location, Utc::now())
    }

    /// Approves a location with an explicit timestamp.
    pub fn approve_at(
        &self,
        location: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<LocationPayrollStatus> {
        let entry = self.entry(location)?;
        let mut status = entry.lock().map_err(|_| lock_poisoned())?;

        match status.status {
            ApprovalStatus::Approved => {
                info!(location, "duplicate approval; already approved");
            }
            ApprovalStatus::Pending => {
                status.status = ApprovalStatus::Approved;
                status.approved_at = Some(now);
                info!(location, "payroll approved");
            }
        }
        Ok(status.clone())
    }

    /// Emits the admin notification once every location in scope has
    /// approved.
    ///
    /// The all-approved invariant is re-validated here against a
    /// consistent snapshot at call time; the caller's cached view is
    /// never trusted. No approval state is mutated, so the operation is
    /// safe to retry after a sink failure.
    ///
    /// # Errors
    ///
    /// - [`EngineError::PreconditionFailed`] listing the still-pending
    ///   locations (an empty scope also fails: there is nothing to
    ///   report as approved).
    /// - [`EngineError::Unavailable`] if the sink rejects delivery.
    pub fn notify_admin(&self, scope: &[String]) -> EngineResult<AdminNotification> {
        self.notify_admin_at(scope, Utc::now())
    }

    /// Admin notification with an explicit timestamp.
    pub fn notify_admin_at(
        &self,
        scope: &[String],
        now: DateTime<Utc>,
    ) -> EngineResult<AdminNotification> {
        let statuses = self.statuses.read().map_err(|_| lock_poisoned())?;

        // BTreeMap iteration yields key order, so the mutexes below are
        // always acquired in a stable order.
        let scoped: Vec<(&String, &Arc<Mutex<LocationPayrollStatus>>)> = statuses
            .iter()
            .filter(|(location, _)| scope.contains(*location))
            .collect();

        if scoped.is_empty() {
            warn!("notify-admin requested with no locations in scope");
            return Err(EngineError::PreconditionFailed { pending: vec![] });
        }

        // Hold every scoped lock through the evaluation and emission so
        // the notification reflects one consistent snapshot.
        let mut guards = Vec::with_capacity(scoped.len());
        for (_, entry) in &scoped {
            guards.push(entry.lock().map_err(|_| lock_poisoned())?);
        }

        let pending: Vec<String> = guards
            .iter()
            .filter(|status| !status.is_approved())
            .map(|status| status.location.clone())
            .collect();
        if !pending.is_empty() {
            warn!(pending = ?pending, "notify-admin rejected; locations still pending");
            return Err(EngineError::PreconditionFailed { pending });
        }

        let notification = AdminNotification {
            id: Uuid::new_v4(),
            locations: guards.iter().map(|s| s.location.clone()).collect(),
            sent_at: now,
        };
        self.sink.notify(notification.clone())?;

        info!(notification_id = %notification.id, "admin notified; all locations approved");
        Ok(notification)
    }

    /// Resets every location to Pending.
    ///
    /// Payroll-cycle rollover hook; invoked by the integrating system's
    /// scheduler at the start of each pay cycle.
    pub fn reset_cycle(&self) -> EngineResult<()> {
        let statuses = self.statuses.read().map_err(|_| lock_poisoned())?;
        for (location, entry) in statuses.iter() {
            let mut status = entry.lock().map_err(|_| lock_poisoned())?;
            *status = LocationPayrollStatus::pending(location.clone());
        }
        info!("payroll cycle reset; all locations pending");
        Ok(())
    }

    fn entry(&self, location: &str) -> EngineResult<Arc<Mutex<LocationPayrollStatus>>> {
        let statuses = self.statuses.read().map_err(|_| lock_poisoned())?;
        statuses
            .get(location)
            .cloned()
            .ok_or_else(|| EngineError::location_not_found(location))
    }
}

fn lock_poisoned() -> EngineError {
    EngineError::Unavailable {
        message: "approval state lock poisoned".to_string(),
    }
}
