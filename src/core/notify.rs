use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Emitted once per goal at the moment its total first reaches the target.
#[derive(Debug, Clone)]
pub struct CompletionEvent {
    pub goal_id: Uuid,
    pub goal_name: String,
    pub target_amount: f64,
    pub completed_at: DateTime<Utc>,
}

/// Receives the edge-triggered completion signal. Delivery is at most once
/// per completion; re-applying transactions to an already-completed goal
/// never re-fires it.
pub trait NotificationSink: Send + Sync {
    fn goal_completed(&self, event: &CompletionEvent);
}

/// Sink that reports completions through tracing.
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn goal_completed(&self, event: &CompletionEvent) {
        tracing::info!(
            goal = %event.goal_name,
            target = event.target_amount,
            "goal completed"
        );
    }
}

/// Sink that captures events for inspection. Used by tests and any frontend
/// that wants to poll instead of reacting inline.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CompletionEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CompletionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl NotificationSink for RecordingSink {
    fn goal_completed(&self, event: &CompletionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
