//! Clock event sink boundary.
//!
//! Every successful clock transition emits a [`ClockEvent`] so that
//! hours accounting and payroll reporting can be reconstructed later.
//! The sink is a trait because the destination is deployment-specific
//! (the production system writes events to a spreadsheet per location).

use std::sync::Mutex;

use crate::error::{EngineError, EngineResult};
use crate::models::ClockEvent;

/// Receives clock events emitted by the attendance tracker.
///
/// A failing sink surfaces as [`EngineError::Unavailable`] and aborts
/// the transition before any state is mutated.
pub trait ClockEventSink: Send + Sync {
    /// Records one clock event.
    fn record(&self, event: ClockEvent) -> EngineResult<()>;
}

/// An in-memory event log for tests and embeddings.
#[derive(Default)]
pub struct InMemoryEventLog {
    events: Mutex<Vec<ClockEvent>>,
}

impl InMemoryEventLog {
    /// Creates an empty event log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded events, oldest first.
    pub fn events(&self) -> Vec<ClockEvent> {
        self.events.lock().expect("event log lock poisoned").clone()
    }
}

impl ClockEventSink for InMemoryEventLog {
    fn record(&self, event: ClockEvent) -> EngineResult<()> {
        let mut events = self.events.lock().map_err(|_| EngineError::Unavailable {
            message: "event log lock poisoned".to_string(),
        })?;
        events.push(event);
        Ok(())
    }
}
