//! Repository ports for the entity store.
//!
//! Every read, update and delete is scoped by the owning user's identifier;
//! that scoping is the only authorization mechanism. Each call is one unit of
//! work: implementations commit it atomically or roll it back.

use crate::task::domain::{
    Category, CategoryId, ChatId, Subtask, SubtaskId, Task, TaskId, TaskStatus, User, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Optional filters for listing a user's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFilter {
    /// Only tasks with this status.
    pub status: Option<TaskStatus>,
    /// Only tasks in this category.
    pub category: Option<CategoryId>,
}

impl TaskFilter {
    /// Matches every task.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            status: None,
            category: None,
        }
    }

    /// Restricts the filter to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to one category.
    #[must_use]
    pub const fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Returns `true` when the task passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self
                .category
                .is_none_or(|category| task.category() == Some(category))
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateTask`] when the identifier exists.
    async fn store(&self, task: &Task) -> RepositoryResult<()>;

    /// Persists changes to an existing task owned by `task.owner()`.
    ///
    /// The stored reminder flag is never cleared: a `task` read before a
    /// sweep marked it keeps the stored `true`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] when no task with that
    /// identifier belongs to the owner.
    async fn update(&self, task: &Task) -> RepositoryResult<()>;

    /// Finds a task by identifier within the owner's tasks.
    async fn find_for_owner(&self, id: TaskId, owner: UserId) -> RepositoryResult<Option<Task>>;

    /// Lists the owner's tasks, newest first.
    async fn list_for_owner(&self, owner: UserId, filter: TaskFilter)
    -> RepositoryResult<Vec<Task>>;

    /// Deletes a task and its subtasks.
    ///
    /// Returns `false` when no such task belongs to the owner.
    async fn delete(&self, id: TaskId, owner: UserId) -> RepositoryResult<bool>;

    /// Returns pending, not-yet-reminded tasks whose deadline is at or before
    /// `threshold`, across all users.
    async fn find_due_for_reminder(&self, threshold: DateTime<Utc>)
    -> RepositoryResult<Vec<Task>>;

    /// Sets the reminder-sent flag on a task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] when the task no longer
    /// exists.
    async fn mark_reminder_sent(&self, id: TaskId) -> RepositoryResult<()>;
}

/// Category persistence contract.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Stores a new category.
    async fn store_category(&self, category: &Category) -> RepositoryResult<()>;

    /// Persists changes to an existing category.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::CategoryNotFound`] when the category does
    /// not belong to the owner.
    async fn update_category(&self, category: &Category) -> RepositoryResult<()>;

    /// Finds a category within the owner's categories.
    async fn find_category(
        &self,
        id: CategoryId,
        owner: UserId,
    ) -> RepositoryResult<Option<Category>>;

    /// Lists the owner's categories ordered by name.
    async fn list_categories(&self, owner: UserId) -> RepositoryResult<Vec<Category>>;

    /// Deletes a category, clearing the reference on its tasks.
    ///
    /// Returns `false` when no such category belongs to the owner.
    async fn delete_category(&self, id: CategoryId, owner: UserId) -> RepositoryResult<bool>;
}

/// Subtask persistence contract.
///
/// Callers verify task ownership before touching subtasks.
#[async_trait]
pub trait SubtaskRepository: Send + Sync {
    /// Stores a new subtask.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] when the owning task does
    /// not exist.
    async fn store_subtask(&self, subtask: &Subtask) -> RepositoryResult<()>;

    /// Persists changes to an existing subtask.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::SubtaskNotFound`] when it does not exist.
    async fn update_subtask(&self, subtask: &Subtask) -> RepositoryResult<()>;

    /// Finds a subtask belonging to the given task.
    async fn find_subtask(
        &self,
        id: SubtaskId,
        task_id: TaskId,
    ) -> RepositoryResult<Option<Subtask>>;

    /// Lists a task's subtasks in creation order.
    async fn list_subtasks(&self, task_id: TaskId) -> RepositoryResult<Vec<Subtask>>;
}

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateChatId`] when the chat identity is
    /// already registered.
    async fn store_user(&self, user: &User) -> RepositoryResult<()>;

    /// Finds a user by internal identifier.
    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>>;

    /// Finds a user by external chat identity.
    async fn find_user_by_chat_id(&self, chat_id: ChatId) -> RepositoryResult<Option<User>>;

    /// Deletes a user with all their tasks, subtasks and categories.
    async fn delete_user(&self, id: UserId) -> RepositoryResult<bool>;
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A user with the same chat identity already exists.
    #[error("duplicate chat identity: {0}")]
    DuplicateChatId(ChatId),

    /// The task was not found for the owner.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The category was not found for the owner.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// The subtask was not found.
    #[error("subtask not found: {0}")]
    SubtaskNotFound(SubtaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
