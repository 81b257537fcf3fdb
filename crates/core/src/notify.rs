//! Notification sink — trait for fire-and-forget success/failure
//! toasts emitted around the launch boundary. Purely observational;
//! never part of the engine's state contract.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);
}

/// No-op sink for tests and embedders without a toast surface.
pub struct NoOpSink;

impl NotificationSink for NoOpSink {
    fn notify(&self, _level: NotificationLevel, _message: &str) {}
}

/// In-memory sink that captures notifications for testing.
#[derive(Default)]
pub struct CaptureSink {
    messages: Mutex<Vec<(NotificationLevel, String)>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<(NotificationLevel, String)> {
        self.messages
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }

    pub fn count(&self) -> usize {
        self.messages
            .lock()
            .expect("notification mutex poisoned")
            .len()
    }

    pub fn count_level(&self, level: NotificationLevel) -> usize {
        self.messages
            .lock()
            .expect("notification mutex poisoned")
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }
}

impl NotificationSink for CaptureSink {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.messages
            .lock()
            .expect("notification mutex poisoned")
            .push((level, message.to_string()));
    }
}

/// Convenience: create a no-op sink for embedders that don't care.
pub fn noop_sink() -> Arc<dyn NotificationSink> {
    Arc::new(NoOpSink)
}

/// Convenience: create a capture sink for tests.
pub fn capture_sink() -> Arc<CaptureSink> {
    Arc::new(CaptureSink::new())
}
