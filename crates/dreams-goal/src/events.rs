// events.rs - Store events and observer dispatch.
//
// The store emits one event after each state change. Front ends use the
// observer seam to re-render; the activity log records the same stream as
// JSONL so a session can be replayed by eye.
//
// Dispatch is synchronous and runs after the write-through save, so an
// observer always sees state that has already been handed to storage.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::goal::{GoalId, TaskId};

/// Events emitted by the store after a mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A goal was appended.
    GoalCreated {
        goal_id: GoalId,
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal and all of its tasks were removed.
    GoalDeleted {
        goal_id: GoalId,
        tasks_removed: usize,
        timestamp: DateTime<Utc>,
    },

    /// A task was appended to a goal.
    TaskAdded {
        goal_id: GoalId,
        task_id: TaskId,
        text: String,
        timestamp: DateTime<Utc>,
    },

    /// A task's completion flag flipped.
    TaskToggled {
        goal_id: GoalId,
        task_id: TaskId,
        completed: bool,
        progress: u8,
        timestamp: DateTime<Utc>,
    },

    /// A task was removed from a goal.
    TaskDeleted {
        goal_id: GoalId,
        task_id: TaskId,
        timestamp: DateTime<Utc>,
    },
}

impl StoreEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            StoreEvent::GoalCreated { .. } => "goal_created",
            StoreEvent::GoalDeleted { .. } => "goal_deleted",
            StoreEvent::TaskAdded { .. } => "task_added",
            StoreEvent::TaskToggled { .. } => "task_toggled",
            StoreEvent::TaskDeleted { .. } => "task_deleted",
        }
    }

    /// The goal the event concerns.
    pub fn goal_id(&self) -> &str {
        match self {
            StoreEvent::GoalCreated { goal_id, .. }
            | StoreEvent::GoalDeleted { goal_id, .. }
            | StoreEvent::TaskAdded { goal_id, .. }
            | StoreEvent::TaskToggled { goal_id, .. }
            | StoreEvent::TaskDeleted { goal_id, .. } => goal_id,
        }
    }

    /// Event for a newly appended goal.
    pub fn goal_created(goal_id: &str, title: &str) -> Self {
        StoreEvent::GoalCreated {
            goal_id: goal_id.to_string(),
            title: title.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Event for a removed goal and the number of tasks dropped with it.
    pub fn goal_deleted(goal_id: &str, tasks_removed: usize) -> Self {
        StoreEvent::GoalDeleted {
            goal_id: goal_id.to_string(),
            tasks_removed,
            timestamp: Utc::now(),
        }
    }

    /// Event for a task appended to a goal.
    pub fn task_added(goal_id: &str, task_id: &str, text: &str) -> Self {
        StoreEvent::TaskAdded {
            goal_id: goal_id.to_string(),
            task_id: task_id.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Event for a flipped task, with the goal's progress afterwards.
    pub fn task_toggled(goal_id: &str, task_id: &str, completed: bool, progress: u8) -> Self {
        StoreEvent::TaskToggled {
            goal_id: goal_id.to_string(),
            task_id: task_id.to_string(),
            completed,
            progress,
            timestamp: Utc::now(),
        }
    }

    /// Event for a task removed from a goal.
    pub fn task_deleted(goal_id: &str, task_id: &str) -> Self {
        StoreEvent::TaskDeleted {
            goal_id: goal_id.to_string(),
            task_id: task_id.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Receives store events.
///
/// Errors are logged by the dispatcher and never undo the mutation.
pub trait StoreObserver {
    /// Handle one event.
    fn notify(&self, event: &StoreEvent) -> Result<(), TrackerError>;
}

/// Appends events as JSONL to a file.
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    /// Create a log writing to `path`. The file is created on first event.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the JSONL file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreObserver for ActivityLog {
    fn notify(&self, event: &StoreEvent) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| TrackerError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| TrackerError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| TrackerError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Fans events out to every registered observer.
#[derive(Default)]
pub struct EventDispatcher {
    observers: Vec<Box<dyn StoreObserver>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn add_observer(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Dispatch an event to all observers.
    pub fn dispatch(&self, event: &StoreEvent) {
        for observer in &self.observers {
            if let Err(e) = observer.notify(event) {
                tracing::warn!(event = event.event_type(), "store observer error: {}", e);
            }
        }
    }
}
