//! Lifecycle reporting for scenario steps.
//!
//! Page objects and scenarios emit [`StepEvent`]s through a
//! [`StepListener`]. Listeners are infallible by contract, so a broken
//! report sink can never change a scenario's outcome.

use std::sync::Mutex;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Severity of a reported step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Progress note
    Info,
    /// A check or action succeeded
    Pass,
    /// A check or action failed
    Fail,
}

impl StepStatus {
    /// Whether this status marks a failure
    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }
}

/// One reported lifecycle event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    /// Step name, usually "page.action"
    pub name: String,
    /// Outcome severity
    pub status: StepStatus,
    /// Free-form detail
    pub message: String,
    /// When the event was emitted
    pub timestamp: SystemTime,
}

impl StepEvent {
    fn now(name: &str, status: StepStatus, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.to_string(),
            timestamp: SystemTime::now(),
        }
    }

    /// A progress event
    #[must_use]
    pub fn info(name: &str, message: &str) -> Self {
        Self::now(name, StepStatus::Info, message)
    }

    /// A success event
    #[must_use]
    pub fn pass(name: &str, message: &str) -> Self {
        Self::now(name, StepStatus::Pass, message)
    }

    /// A failure event
    #[must_use]
    pub fn fail(name: &str, message: &str) -> Self {
        Self::now(name, StepStatus::Fail, message)
    }
}

/// Sink for step events.
///
/// `on_step` is infallible: a listener that cannot record an event drops
/// it rather than disturbing the scenario.
pub trait StepListener: Send + Sync {
    /// Receive one event
    fn on_step(&self, event: &StepEvent);
}

/// Listener that keeps every event in memory, for inspection by tests
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<StepEvent>>,
}

impl RecordingListener {
    /// An empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far, in arrival order
    #[must_use]
    pub fn events(&self) -> Vec<StepEvent> {
        self.events.lock().map_or_else(
            |poisoned| poisoned.into_inner().clone(),
            |events| events.clone(),
        )
    }
}

impl StepListener for RecordingListener {
    fn on_step(&self, event: &StepEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Listener that forwards events to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl StepListener for TracingListener {
    fn on_step(&self, event: &StepEvent) {
        match event.status {
            StepStatus::Info => {
                tracing::info!(step = event.name, message = event.message, "step");
            }
            StepStatus::Pass => {
                tracing::info!(step = event.name, message = event.message, "step passed");
            }
            StepStatus::Fail => {
                tracing::error!(step = event.name, message = event.message, "step failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_status() {
        assert_eq!(StepEvent::info("login.open", "navigating").status, StepStatus::Info);
        assert_eq!(StepEvent::pass("login.submit", "done").status, StepStatus::Pass);
        assert_eq!(StepEvent::fail("login.submit", "timeout").status, StepStatus::Fail);
    }

    #[test]
    fn test_only_fail_is_fail() {
        assert!(StepStatus::Fail.is_fail());
        assert!(!StepStatus::Info.is_fail());
        assert!(!StepStatus::Pass.is_fail());
    }

    #[test]
    fn test_recording_listener_preserves_order() {
        let listener = RecordingListener::new();
        listener.on_step(&StepEvent::info("login.open", "navigating"));
        listener.on_step(&StepEvent::pass("login.submit", "logged in"));

        let events = listener.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "login.open");
        assert_eq!(events[1].name, "login.submit");
        assert_eq!(events[1].status, StepStatus::Pass);
    }

    #[test]
    fn test_event_serializes_with_lowercase_status() {
        let event = StepEvent::pass("checkout.finish", "order placed");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"status\":\"pass\""));

        let back: StepEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
