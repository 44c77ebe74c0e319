//! Admin notification sink boundary.
//!
//! Once every scoped location approves its payroll, the coordinator
//! emits one [`AdminNotification`] through this sink. Delivery is
//! deployment-specific (the production system emails every admin); the
//! engine only requires that delivery reports success or failure.

use std::sync::Mutex;

use crate::error::{EngineError, EngineResult};
use crate::models::AdminNotification;

/// Delivers admin notifications.
///
/// A failing sink surfaces as [`EngineError::Unavailable`]; the
/// coordinator mutates no approval state either way, so the caller may
/// retry safely.
pub trait NotificationSink: Send + Sync {
    /// Delivers one notification.
    fn notify(&self, notification: AdminNotification) -> EngineResult<()>;
}

/// An in-memory sink that records notifications for tests and
/// embeddings.
#[derive(Default)]
pub struct InMemoryNotifier {
    sent: Mutex<Vec<AdminNotification>>,
}

impl InMemoryNotifier {
    /// Creates an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all delivered notifications, oldest first.
    pub fn sent(&self) -> Vec<AdminNotification> {
        self.sent.lock().expect("notifier lock poisoned").clone()
    }
}

impl NotificationSink for InMemoryNotifier {
    fn notify(&self, notification: AdminNotification) -> EngineResult<()> {
        let mut sent = self.sent.lock().map_err(|_| EngineError::Unavailable {
            message: "notifier lock poisoned".to_string(),
        })?;
        sent.push(notification);
        Ok(())
    }
}
