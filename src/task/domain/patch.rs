//! Explicit partial-update requests for tasks and categories.
//!
//! Each optional field distinguishes "leave unchanged" from "clear" from
//! "set", so empty or zero values are never confused with an absent field.

use super::{CategoryColor, CategoryId, CategoryName, Priority, TaskStatus, TaskTitle};
use chrono::{DateTime, Utc};

/// Requested change to a nullable field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// Leave the current value untouched.
    #[default]
    Keep,
    /// Replace the current value.
    Set(T),
    /// Remove the current value.
    Clear,
}

impl<T> FieldUpdate<T> {
    /// Applies the update to an optional slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Set(value) => *slot = Some(value),
            Self::Clear => *slot = None,
        }
    }

    /// Returns `true` when the update leaves the field unchanged.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

impl FieldUpdate<String> {
    /// Builds a text update where blank input clears the field.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Clear
        } else {
            Self::Set(trimmed.to_owned())
        }
    }
}

/// Partial update for a task.
///
/// Fields left at their defaults are not touched. The reminder flag is not
/// part of the patch and is therefore never reset by an update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<TaskTitle>,
    /// Description change.
    pub description: FieldUpdate<String>,
    /// New lifecycle status.
    pub status: Option<TaskStatus>,
    /// New priority tier.
    pub priority: Option<Priority>,
    /// Category change.
    pub category: FieldUpdate<CategoryId>,
    /// Deadline change.
    pub deadline: FieldUpdate<DateTime<Utc>>,
    /// Estimated duration change, in minutes.
    pub estimated_minutes: FieldUpdate<u32>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the description change.
    #[must_use]
    pub fn with_description(mut self, description: FieldUpdate<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority tier.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the category change.
    #[must_use]
    pub const fn with_category(mut self, category: FieldUpdate<CategoryId>) -> Self {
        self.category = category;
        self
    }

    /// Sets the deadline change.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: FieldUpdate<DateTime<Utc>>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the estimate change.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, estimate: FieldUpdate<u32>) -> Self {
        self.estimated_minutes = estimate;
        self
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_keep()
            && self.status.is_none()
            && self.priority.is_none()
            && self.category.is_keep()
            && self.deadline.is_keep()
            && self.estimated_minutes.is_keep()
    }
}

/// Partial update for a category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryPatch {
    /// New name.
    pub name: Option<CategoryName>,
    /// New color.
    pub color: Option<CategoryColor>,
}
