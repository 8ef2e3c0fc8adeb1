//! Checklist items belonging to a task.

use super::{SubtaskId, SubtaskTitle, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A checklist item owned by exactly one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    task_id: TaskId,
    title: SubtaskTitle,
    is_completed: bool,
    created_at: DateTime<Utc>,
}

impl Subtask {
    /// Creates an open subtask.
    #[must_use]
    pub fn new(task_id: TaskId, title: SubtaskTitle, clock: &impl Clock) -> Self {
        Self {
            id: SubtaskId::new(),
            task_id,
            title,
            is_completed: false,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a subtask from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: SubtaskId,
        task_id: TaskId,
        title: SubtaskTitle,
        is_completed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            title,
            is_completed,
            created_at,
        }
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &SubtaskTitle {
        &self.title
    }

    /// Returns whether the item is checked off.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flips the completion flag.
    pub const fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }
}
