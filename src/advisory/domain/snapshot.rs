//! Read-only task view handed to the advisory engine.

use crate::scheduling::domain::Schedulable;
use crate::task::domain::{Priority, Task, TaskStatus};
use chrono::{DateTime, Utc};

/// The task fields an advisory prompt may mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Task title.
    pub title: String,
    /// Priority tier.
    pub priority: Priority,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Estimated duration in minutes, if any.
    pub estimated_minutes: Option<u32>,
}

impl From<&Task> for TaskSnapshot {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            priority: task.priority(),
            status: task.status(),
            deadline: task.deadline(),
            estimated_minutes: task.estimated_minutes(),
        }
    }
}

impl Schedulable for TaskSnapshot {
    fn status(&self) -> TaskStatus {
        self.status
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }
}
