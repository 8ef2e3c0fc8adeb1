//! Task aggregate root and its lifecycle enumerations.

use super::{CategoryId, ParseTaskFieldError, TaskDomainError, TaskId, TaskPatch, TaskTitle, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been started.
    Pending,
    /// Task is being worked on.
    InProgress,
    /// Task has been finished.
    Completed,
    /// Task has been dropped.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskFieldError::Status(value.to_owned())),
        }
    }
}

/// User-assigned priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default tier.
    #[default]
    Medium,
    /// Should be done soon.
    High,
    /// Must be done first.
    Urgent,
}

impl Priority {
    /// All tiers from most to least important.
    pub const ALL: [Self; 4] = [Self::Urgent, Self::High, Self::Medium, Self::Low];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Ordering rank where `0` is the most important tier.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Parses chat input leniently, falling back to [`Priority::Medium`] for
    /// unrecognized tier names.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        Self::try_from(value).unwrap_or_default()
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseTaskFieldError::Priority(value.to_owned())),
        }
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning user.
    pub owner: UserId,
    /// Task title.
    pub title: TaskTitle,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Priority tier.
    pub priority: Priority,
    /// Optional category.
    pub category: Option<CategoryId>,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Optional estimated duration in minutes.
    pub estimated_minutes: Option<u32>,
}

impl NewTask {
    /// Creates input with the required fields and medium priority.
    #[must_use]
    pub fn new(owner: UserId, title: TaskTitle) -> Self {
        Self {
            owner,
            title,
            description: None,
            priority: Priority::default(),
            category: None,
            deadline: None,
            estimated_minutes: None,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    category: Option<CategoryId>,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: Priority,
    deadline: Option<DateTime<Utc>>,
    estimated_minutes: Option<u32>,
    actual_minutes: u32,
    reminder_sent: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning user.
    pub owner: UserId,
    /// Category reference, if any.
    pub category: Option<CategoryId>,
    /// Title.
    pub title: TaskTitle,
    /// Description, if any.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Priority tier.
    pub priority: Priority,
    /// Deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Estimated duration in minutes, if any.
    pub estimated_minutes: Option<u32>,
    /// Accumulated actual duration in minutes.
    pub actual_minutes: u32,
    /// Whether the deadline reminder has been delivered.
    pub reminder_sent: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// First completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a pending task.
    #[must_use]
    pub fn new(input: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner: input.owner,
            category: input.category,
            title: input.title,
            description: input.description,
            status: TaskStatus::Pending,
            priority: input.priority,
            deadline: input.deadline,
            estimated_minutes: input.estimated_minutes,
            actual_minutes: 0,
            reminder_sent: false,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            category: data.category,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            deadline: data.deadline,
            estimated_minutes: data.estimated_minutes,
            actual_minutes: data.actual_minutes,
            reminder_sent: data.reminder_sent,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the category reference, if any.
    #[must_use]
    pub const fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority tier.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the estimated duration in minutes, if any.
    #[must_use]
    pub const fn estimated_minutes(&self) -> Option<u32> {
        self.estimated_minutes
    }

    /// Returns the accumulated actual duration in minutes.
    #[must_use]
    pub const fn actual_minutes(&self) -> u32 {
        self.actual_minutes
    }

    /// Returns whether the deadline reminder has been delivered.
    #[must_use]
    pub const fn reminder_sent(&self) -> bool {
        self.reminder_sent
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the first completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Moves the task to a new status.
    ///
    /// The completion timestamp is recorded the first time the task becomes
    /// completed and is never cleared afterwards.
    pub fn change_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        let now = clock.utc();
        self.status = status;
        if status == TaskStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        self.updated_at = now;
    }

    /// Applies a partial update.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) {
        let TaskPatch {
            title,
            description,
            status,
            priority,
            category,
            deadline,
            estimated_minutes,
        } = patch;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        description.apply_to(&mut self.description);
        category.apply_to(&mut self.category);
        deadline.apply_to(&mut self.deadline);
        estimated_minutes.apply_to(&mut self.estimated_minutes);

        match status {
            Some(new_status) => self.change_status(new_status, clock),
            None => self.touch(clock),
        }
    }

    /// Adds worked minutes to the actual-duration accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DurationOverflow`] when the total would not
    /// fit the accumulator.
    pub fn record_time(&mut self, minutes: u32, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.actual_minutes = self.actual_minutes.checked_add(minutes).ok_or_else(|| {
            TaskDomainError::DurationOverflow(u64::from(self.actual_minutes) + u64::from(minutes))
        })?;
        self.touch(clock);
        Ok(())
    }

    /// Records that the deadline reminder was delivered.
    pub const fn mark_reminder_sent(&mut self) {
        self.reminder_sent = true;
    }

    /// Drops the category reference after the category was deleted.
    pub const fn detach_category(&mut self) {
        self.category = None;
    }

    /// Returns `true` when the deadline sweep should remind about this task.
    ///
    /// Only pending tasks with a deadline at or before `threshold` that have
    /// not been reminded yet qualify.
    #[must_use]
    pub fn is_due_for_reminder(&self, threshold: DateTime<Utc>) -> bool {
        self.status == TaskStatus::Pending
            && !self.reminder_sent
            && self.deadline.is_some_and(|deadline| deadline <= threshold)
    }

    /// Returns `true` when the task is pending and its deadline has passed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == TaskStatus::Pending && self.deadline.is_some_and(|deadline| deadline < now)
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
